use lincode::solver::Combinations;
use lincode::{hamming, parity_check_matrix, solve, CodeError, LinearCode, Matrix, Row};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn flip(word: &Row, positions: &[usize]) -> Row {
    let mut out = word.clone();
    for &i in positions {
        out[i] ^= 1;
    }
    out
}

fn six_two() -> LinearCode {
    let g = Matrix::from_vecs(vec![vec![0, 1, 1, 1, 0, 0], vec![0, 1, 1, 0, 1, 1]]).unwrap();
    let h = parity_check_matrix(&g).unwrap();
    LinearCode::new(g, h)
}

#[test]
fn encode_and_decode_by_hand() {
    init_logging();
    let code = six_two();
    assert_eq!(code.distance().unwrap(), 3);
    assert!(!code.is_systematic().unwrap());

    let sent = code.encode_str("10").unwrap();
    assert_eq!(sent, "011100");
    assert_eq!(code.decode_detect_str(&sent).unwrap().message(), "10");
    assert_eq!(code.decode_correct_str("011101").unwrap().message(), "10");

    let noisy = code.decode_detect_str("011101").unwrap();
    assert_eq!(noisy.message(), "??");
    assert_eq!(noisy.flagged_blocks(), &[0]);
}

#[test]
fn solve_reports_parameters() {
    init_logging();
    let rows = Matrix::from_vecs(vec![
        vec![0, 1, 1, 1, 0, 0],
        vec![0, 1, 1, 0, 1, 1],
        vec![0, 0, 0, 1, 1, 1],
    ])
    .unwrap();
    let params = solve(&rows).unwrap().parameters().unwrap();
    assert_eq!(
        params.to_string(),
        "Linear Code Parameters:\n  - Code Length (n): 6\n  - Code Dimension (k): 2\n  \
         - Code Size (M): 4\n  - Delta (d): 3\n  - Error Detection: 2\n  - Error Correction: 1"
    );
    assert_eq!(params.n_k_d_q(), [6, 2, 3, 2]);
    assert!((params.rate() - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn hamming_3_corrects_every_single_error() {
    init_logging();
    let code = hamming(3).unwrap();
    let codewords = code.codewords().unwrap();
    assert_eq!(codewords.len(), 16);

    for (codeword, message) in codewords {
        for i in 0..7 {
            let received = flip(codeword, &[i]);
            let corrected = code.decode_correct(&received).unwrap();
            assert!(corrected.is_clean());
            assert_eq!(corrected.message(), message.to_bit_string());

            let detected = code.decode_detect(&received).unwrap();
            assert_eq!(detected.message(), "????");
        }
    }
}

#[test]
fn hamming_syndromes_name_the_flipped_column() {
    let code = hamming(3).unwrap();
    let h = code.parity_check().unwrap();
    let zero = Row::zeros(7);
    for i in 0..7 {
        assert_eq!(code.syndrome(&flip(&zero, &[i])).unwrap(), h.column(i).unwrap());
    }
    // column i holds the binary form of 7 - i
    assert_eq!(h.column(0).unwrap(), "111".parse::<Row>().unwrap());
    assert_eq!(h.column(6).unwrap(), "001".parse::<Row>().unwrap());
}

#[test]
fn larger_hamming_codes() {
    init_logging();
    for t in 4..=5 {
        let code = hamming(t).unwrap();
        let n = (1usize << t) - 1;
        assert_eq!(code.length().unwrap(), n);
        assert_eq!(code.dimension().unwrap(), n - t as usize);
        assert_eq!(code.distance().unwrap(), 3);
        assert_eq!(code.syndrome_table().unwrap().len(), n);
    }
}

#[test]
fn repetition_code_corrects_two_errors() {
    init_logging();
    let code = solve(&Matrix::ones(1, 5)).unwrap();
    let params = code.parameters().unwrap();
    assert_eq!((params.n, params.k, params.d), (5, 1, 5));
    assert_eq!(params.error_correction(), 2);

    let sent = code.encode_str("10").unwrap();
    assert_eq!(sent, "1111100000");
    for w in 1..=2 {
        for positions in Combinations::new(10, w) {
            let received = flip(&sent.parse().unwrap(), &positions);
            assert_eq!(code.decode_correct(&received).unwrap().message(), "10");
        }
    }
}

#[test]
fn uncorrectable_blocks_do_not_stop_decoding() {
    init_logging();
    let code = six_two();
    // the middle block has two errors that no single-bit pattern explains
    let decoded = code.decode_correct_str("011100110000011011").unwrap();
    assert_eq!(decoded.message(), "10??01");
    assert_eq!(decoded.flagged_blocks(), &[1]);
    assert!(!decoded.is_clean());
}

#[test]
fn min_distance_of_small_code() {
    let g = Matrix::from_vecs(vec![vec![1, 0, 1, 1], vec![0, 1, 1, 0]]).unwrap();
    let code = solve(&g).unwrap();
    assert!(code.is_systematic().unwrap());
    assert_eq!(code.distance().unwrap(), 2);
    assert_eq!(code.parameters().unwrap().error_correction(), 0);

    // t = 0, so a single error is left alone
    let decoded = code.decode_correct_str("1111").unwrap();
    assert_eq!(decoded.message(), "??");
}

#[test]
fn errors_surface_to_the_caller() {
    let code = six_two();
    assert_eq!(
        code.encode_str("101").unwrap_err(),
        CodeError::BlockLength { len: 3, block: 2 }
    );
    assert!(code.decode_correct_str("0111").is_err());
    assert!(code.encode_str("1x").is_err());

    let empty = LinearCode::default();
    assert_eq!(empty.encode_str("10").unwrap_err(), CodeError::MissingGenerator);
    assert_eq!(hamming(1).unwrap_err(), CodeError::InvalidHammingParameter(1));
    assert_eq!(solve(&Matrix::zeros(3, 3)).unwrap_err(), CodeError::DegenerateCode);
}
