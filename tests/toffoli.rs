use qreg::prelude::*;
use qreg::utils::from_reals;

// https://en.wikipedia.org/wiki/Quantum_logic_gate#Toffoli_(CCNOT)_gate
fn truth_table() -> Vec<((u8, u8, u8), (bool, bool, bool))> {
    vec![
        ((0, 0, 0), (false, false, false)),
        ((0, 0, 1), (false, false, true)),
        ((0, 1, 0), (false, true, false)),
        ((0, 1, 1), (false, true, true)),
        ((1, 0, 0), (true, false, false)),
        ((1, 0, 1), (true, false, true)),
        ((1, 1, 0), (true, true, true)),
        ((1, 1, 1), (true, true, false)),
    ]
}

fn basis_qubit(bit: u8) -> Vec<Complex<f64>> {
    if bit == 1 {
        from_reals(&[0.0, 1.0])
    } else {
        from_reals(&[1.0, 0.0])
    }
}

#[test]
fn test_toffoli() -> Result<(), RegisterError> {
    let ccnot = combos::toffoli::<f64>()?;
    for ((a, b, c), expected) in truth_table() {
        let mut r = QubitRegister::<f64>::seeded(3, 17)?;

        // change inputs as truth table
        r.set_amps(&basis_qubit(a), &[0])?
            .set_amps(&basis_qubit(b), &[1])?
            .set_amps(&basis_qubit(c), &[2])?;

        r.do_op(&ccnot, &[0, 1, 2])?;

        let measured = (r.measure(0)?, r.measure(1)?, r.measure(2)?);
        assert_eq!(measured, expected, "input |{}{}{}>", a, b, c);
    }
    Ok(())
}

#[test]
fn test_toffoli_amplitudes() -> Result<(), RegisterError> {
    let ccnot = combos::toffoli::<f64>()?;

    // |110> -> |111>
    let mut r = QubitRegister::<f64>::seeded(3, 0)?;
    r.couple(&[0, 1, 2])?;
    let mut input = vec![0.0; 8];
    input[0b110] = 1.0;
    r.set_amps(&from_reals(&input), &[0, 1, 2])?;
    r.do_op(&ccnot, &[0, 1, 2])?;
    let out = r.amplitudes(&[0, 1, 2])?;
    out.iter().enumerate().for_each(|(i, c)| {
        let expected = if i == 0b111 { 1.0 } else { 0.0 };
        assert!((c - Complex::new(expected, 0.0)).norm() < 1e-10, "{:?}", out);
    });

    // |100> unchanged
    let mut r = QubitRegister::<f64>::seeded(3, 0)?;
    r.do_op(&gates::pauli_x(), &[0])?;
    r.do_op(&ccnot, &[0, 1, 2])?;
    let out = r.amplitudes(&[0, 1, 2])?;
    out.iter().enumerate().for_each(|(i, c)| {
        let expected = if i == 0b100 { 1.0 } else { 0.0 };
        assert!((c - Complex::new(expected, 0.0)).norm() < 1e-10, "{:?}", out);
    });
    Ok(())
}

#[test]
fn test_toffoli_on_permuted_qubits() -> Result<(), RegisterError> {
    // Controls on qubits 3 and 0, target on 1, in a five qubit register.
    let mut r = QubitRegister::<f64>::seeded(5, 9)?;
    r.do_op(&gates::pauli_x(), &[3])?.do_op(&gates::pauli_x(), &[0])?;
    r.do_op(&combos::toffoli()?, &[3, 0, 1])?;
    assert!(r.measure(1)?);
    assert!(r.measure(0)?);
    assert!(r.measure(3)?);
    assert!(!r.measure(2)?);
    assert!(!r.measure(4)?);
    Ok(())
}
