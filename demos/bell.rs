use qreg::prelude::*;

/// Prepare a Bell pair next to an untouched qubit and sample it a few times.
fn main() -> Result<(), RegisterError> {
    let runs = 10;
    let mut agree = 0;
    for seed in 0..runs {
        let mut r = QubitRegister::<f64>::seeded(3, seed)?;
        r.do_op(&gates::hadamard(), &[0])?
            .do_op(&gates::cnot(), &[0, 1])?;

        println!(
            "run {}: {} containers, p(q1 = 1) = {:.3}",
            seed,
            r.container_ids().len(),
            r.probability(1)?
        );

        let (a, b) = (r.measure(0)?, r.measure(1)?);
        if a == b {
            agree += 1;
        }
        println!("measured q0={} q1={} q2={}", a as u8, b as u8, r.measure(2)? as u8);
    }
    println!("{}/{} runs agreed", agree, runs);
    Ok(())
}
