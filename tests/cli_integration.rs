use std::process::Command;
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_romweave").to_string()
}

#[test]
fn cli_interleave_word16() {
    let dir = tempdir().unwrap();
    let low = dir.path().join("low.bin");
    let high = dir.path().join("high.bin");
    let out = dir.path().join("out.bin");

    std::fs::write(&low, [0x01, 0x02, 0x03, 0x04]).unwrap();
    std::fs::write(&high, [0xAA, 0xBB, 0xCC, 0xDD]).unwrap();

    let st = Command::new(bin())
        .args(["--quiet", "interleave"])
        .arg(&low)
        .arg(&high)
        .arg(&out)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(
        std::fs::read(&out).unwrap(),
        [0xAA, 0x01, 0xBB, 0x02, 0xCC, 0x03, 0xDD, 0x04]
    );
}

#[test]
fn cli_interleave_invalid_word_exits_1() {
    let dir = tempdir().unwrap();
    let low = dir.path().join("low.bin");
    let high = dir.path().join("high.bin");
    std::fs::write(&low, [0u8; 2]).unwrap();
    std::fs::write(&high, [0u8; 2]).unwrap();

    let st = Command::new(bin())
        .args(["--quiet", "interleave", "--word", "24"])
        .arg(&low)
        .arg(&high)
        .arg(dir.path().join("out.bin"))
        .status()
        .unwrap();
    assert_eq!(st.code(), Some(1));
}

#[test]
fn cli_interleave_size_mismatch_exits_2() {
    let dir = tempdir().unwrap();
    let low = dir.path().join("low.bin");
    let high = dir.path().join("high.bin");
    let out = dir.path().join("out.bin");
    std::fs::write(&low, [0u8; 4]).unwrap();
    std::fs::write(&high, [0u8; 5]).unwrap();

    let st = Command::new(bin())
        .args(["--quiet", "interleave"])
        .arg(&low)
        .arg(&high)
        .arg(&out)
        .status()
        .unwrap();
    assert_eq!(st.code(), Some(2));
    assert!(!out.exists(), "no partial output on size mismatch");
}

#[test]
fn cli_interleave_big_endian_swaps_roles() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    let out = dir.path().join("out.bin");
    std::fs::write(&a, [0x01, 0x02]).unwrap();
    std::fs::write(&b, [0xAA, 0xBB]).unwrap();

    let st = Command::new(bin())
        .args(["--quiet", "interleave", "--big-endian"])
        .arg(&a)
        .arg(&b)
        .arg(&out)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(std::fs::read(&out).unwrap(), [0x01, 0xAA, 0x02, 0xBB]);
}

fn bin_image(least: [u8; 4], greatest: [u8; 4]) -> Vec<u8> {
    let mut data = b"stub".to_vec();
    data.extend_from_slice(b"B000FF\n");
    data.extend_from_slice(&least);
    data.extend_from_slice(&greatest);
    data.extend_from_slice(&[0u8; 16]);
    data
}

#[test]
fn cli_info_reports_range() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("image.bin");
    std::fs::write(&image, bin_image([0x01, 0, 0, 0], [0x05, 0, 0, 0])).unwrap();

    let out = Command::new(bin())
        .args(["--quiet", "info"])
        .arg(&image)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Sync marker offset:     0x4"), "{stdout}");
    assert!(stdout.contains("Image start address:    0x1"), "{stdout}");
    assert!(stdout.contains("Image greatest address: 0x5"), "{stdout}");
    assert!(stdout.contains("Record length:          0x4"), "{stdout}");
}

#[test]
fn cli_info_base_address_subtracted() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("image.bin");
    std::fs::write(
        &image,
        bin_image([0x00, 0x10, 0x00, 0x80], [0x00, 0x20, 0x00, 0x80]),
    )
    .unwrap();

    let out = Command::new(bin())
        .args(["--quiet", "info", "--base", "0x80000000"])
        .arg(&image)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Relative start:         0x1000"), "{stdout}");
}

#[test]
fn cli_info_missing_marker_exits_1_with_no_report() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("plain.bin");
    std::fs::write(&image, [0x55u8; 64]).unwrap();

    let out = Command::new(bin())
        .args(["--quiet", "info"])
        .arg(&image)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty(), "no report after a fatal failure");
}

#[test]
fn cli_info_bad_base_exits_1() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("image.bin");
    std::fs::write(&image, bin_image([0; 4], [0; 4])).unwrap();

    let st = Command::new(bin())
        .args(["--quiet", "info", "--base", "xyz"])
        .arg(&image)
        .status()
        .unwrap();
    assert_eq!(st.code(), Some(1));
}

#[test]
fn cli_info_missing_file_exits_1() {
    let st = Command::new(bin())
        .args(["--quiet", "info", "/nonexistent/image.bin"])
        .status()
        .unwrap();
    assert_eq!(st.code(), Some(1));
}

#[test]
fn cli_json_stats_on_stderr() {
    let dir = tempdir().unwrap();
    let low = dir.path().join("low.bin");
    let high = dir.path().join("high.bin");
    let out_path = dir.path().join("out.bin");
    std::fs::write(&low, [1u8, 2]).unwrap();
    std::fs::write(&high, [3u8, 4]).unwrap();

    let out = Command::new(bin())
        .args(["--quiet", "--json", "interleave"])
        .arg(&low)
        .arg(&high)
        .arg(&out_path)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("\"output_size\": 4"), "{stderr}");
}
