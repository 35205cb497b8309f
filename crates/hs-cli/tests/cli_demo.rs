use std::path::PathBuf;
use std::process::{Command, Output};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hepstyle"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

#[test]
fn demo_writes_all_plots_deterministically() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();

    for dir in [&a, &b] {
        let out = run(&["demo", "--out-dir", dir.path().to_string_lossy().as_ref(), "--seed", "11"]);
        assert!(out.status.success(), "demo should succeed, stderr={}", String::from_utf8_lossy(&out.stderr));
        let manifest: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        assert_eq!(manifest["written"].as_array().unwrap().len(), 10);
    }

    let names = [
        "example_square_pos0.svg",
        "example_rectangle_pos11_ratio.svg",
        "example_2D_square_pos0.svg",
        "example_2D_rectangle_pos0.svg",
    ];
    for name in names {
        let pa = a.path().join(name);
        assert!(pa.exists(), "missing {}", pa.display());
        let sa = std::fs::read_to_string(&pa).unwrap();
        let sb = std::fs::read_to_string(b.path().join(name)).unwrap();
        assert_eq!(sa, sb, "{name} differs between identical runs");
        assert!(sa.contains("Simulation Preliminary"));
    }
}

#[test]
fn unknown_format_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let out = run(&["demo", "--out-dir", out_dir.to_string_lossy().as_ref(), "--format", "gif"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsupported output format"));
    assert!(!out_dir.exists());
}

#[test]
fn config_overrides_extra_text() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("style.yaml");
    std::fs::write(&cfg, "experiment:\n  extra_text: Internal\n").unwrap();
    let out = run(&[
        "demo",
        "--out-dir",
        dir.path().to_string_lossy().as_ref(),
        "--config",
        cfg.to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let svg = std::fs::read_to_string(dir.path().join("example_square_pos11.svg")).unwrap();
    assert!(svg.contains("Internal"));
    assert!(!svg.contains("Simulation Preliminary"));
}
