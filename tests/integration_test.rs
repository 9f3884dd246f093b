use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use vcs_backend::tools::{MockRunner, TemplateEngine};
use vcs_backend::{create_backend, Backend, BackendError, BackendStage, EdamParser, Vcs};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/blinky.json")
}

fn load_vcs(work_root: &std::path::Path) -> Vcs {
    let edam = EdamParser::from_file(&fixture()).unwrap().parse().unwrap();
    Vcs::new(edam, work_root).unwrap()
}

#[test]
fn test_configure_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let work_root = dir.path().join("build");
    let vcs = load_vcs(&work_root);

    vcs.configure().unwrap();

    let analyze = fs::read_to_string(work_root.join("analyze.bash")).unwrap();
    let script = vcs.analyze_script();
    assert_eq!(script.libraries, vec!["work", "blinky_lib"]);
    assert_eq!(analyze.lines().count(), script.commands.len());
    println!("analyze.bash:\n{}", analyze);
    let lines: Vec<&str> = analyze.lines().collect();
    assert_eq!(
        lines,
        vec![
            "vlogan -timescale=1ns/1ps +define+SIMULATION=1 +incdir+rtl -q -full64 rtl/blinky.v",
            "vhdlan -2008 -q -full64 rtl/blinky_pkg.vhd",
            "vlogan -timescale=1ns/1ps +define+SIMULATION=1 -sverilog +incdir+rtl -q -full64 tb/blinky_tb.sv",
        ]
    );

    let parameters = fs::read_to_string(work_root.join("parameters.snps")).unwrap();
    assert_eq!(
        parameters,
        "assign 8 blinky_tb/WIDTH\nassign init.hex blinky_tb/INIT_FILE\n"
    );

    let tcl = fs::read_to_string(work_root.join("vcs_main.tcl")).unwrap();
    assert_eq!(tcl, "do sim/waves.tcl\n");

    let makefile = fs::read_to_string(work_root.join("Makefile")).unwrap();
    println!("Makefile:\n{}", makefile);
    assert!(makefile.contains("all: blinky"));
    assert!(makefile.contains("vcs -full64 -top blinky_tb"));
    assert!(makefile.contains("-debug_access+all -sverilog +v2k"));
    assert!(makefile.contains("\ttime ./blinky -l vcs.log -ucli -do vcs_main.tcl -licqueue +trace +cycles=1000 $(EXTRA_OPTIONS)"));
    assert_eq!(makefile.matches("+v2k").count(), 1);
    assert!(!makefile.contains("{{"));
}

#[test]
fn test_configure_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let vcs = load_vcs(dir.path());

    vcs.configure().unwrap();
    let first = fs::read_to_string(dir.path().join("Makefile")).unwrap();
    vcs.configure().unwrap();
    let second = fs::read_to_string(dir.path().join("Makefile")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_configure_without_tcl_sources() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"{"name": "tiny", "toplevel": "tiny",
        "files": [{"name": "tiny.v", "file_type": "verilogSource"}]}"#;
    let edam = EdamParser::new(json.to_string()).parse().unwrap();
    let vcs = Vcs::new(edam, dir.path()).unwrap();

    vcs.configure().unwrap();

    assert!(!dir.path().join("vcs_main.tcl").exists());
    assert_eq!(fs::read_to_string(dir.path().join("parameters.snps")).unwrap(), "");
    let makefile = fs::read_to_string(dir.path().join("Makefile")).unwrap();
    assert!(!makefile.contains("-ucli"));
    assert!(!makefile.contains("-sverilog"));
}

#[test]
fn test_run_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Rc::new(MockRunner::new());
    let mut vcs = load_vcs(dir.path()).with_runner(runner.clone());

    vcs.apply_overrides(BackendStage::Run, &["seed=3".to_string(), "trace=false".to_string()])
        .unwrap();
    vcs.run().unwrap();

    let calls = runner.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "make");
    assert_eq!(calls[0].cwd, dir.path());
    assert_eq!(
        calls[0].args,
        vec!["run", "EXTRA_OPTIONS=+before=time +trace=0 +cycles=1000 +seed=3"]
    );
}

#[test]
fn test_rejects_override_of_unknown_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let mut vcs = load_vcs(dir.path());

    let err = vcs
        .apply_overrides(BackendStage::Run, &["bogus=1".to_string()])
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BackendError>(),
        Some(BackendError::InvalidArgument(_))
    ));
}

#[test]
fn test_configure_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let mut vcs = load_vcs(dir.path());

    vcs.apply_overrides(BackendStage::Configure, &["WIDTH=16".to_string()])
        .unwrap();
    vcs.configure().unwrap();

    let params = fs::read_to_string(dir.path().join("parameters.snps")).unwrap();
    println!("parameters.snps:\n{}", params);
    assert!(params.contains("assign 16 blinky_tb/WIDTH"));
    assert!(!params.contains("assign 8 blinky_tb/WIDTH"));
}

#[test]
fn test_run_rejects_build_time_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Rc::new(MockRunner::new());
    let mut vcs = load_vcs(dir.path()).with_runner(runner.clone());

    let err = vcs
        .apply_overrides(BackendStage::Run, &["WIDTH=16".to_string()])
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BackendError>(),
        Some(BackendError::InvalidArgument(_))
    ));
    assert!(runner.invocations().is_empty());
}

#[test]
fn test_template_failure_fails_configure() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = TemplateEngine::empty();
    engine.register("Makefile.j2", "all: {{ name }} {{ simulator_path }}\n");
    let vcs = load_vcs(dir.path()).with_renderer(engine);

    let err = vcs.configure().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BackendError>(),
        Some(BackendError::Template { .. })
    ));
    assert!(!dir.path().join("Makefile").exists());
}

#[test]
fn test_create_backend_for_vcs() {
    let dir = tempfile::tempdir().unwrap();
    let edam = EdamParser::from_file(&fixture()).unwrap().parse().unwrap();
    let backend = create_backend("vcs", edam, dir.path().to_path_buf()).unwrap();

    backend.configure().unwrap();
    assert_eq!(backend.name(), "vcs");
    assert!(dir.path().join("analyze.bash").exists());
}
