//! End-to-end checks of the driver declaration set.

use tracegen::tracepoints;
use tracegen_model::{Registry, ScopedEvent};

#[test]
fn test_blit_scoped_event_shape() {
    let reg = tracepoints::build_registry().expect("declarations must be valid");

    let start = reg
        .tracepoints()
        .iter()
        .find(|tp| tp.name() == "start_blit")
        .expect("start_blit registered");
    let end = reg
        .tracepoints()
        .iter()
        .find(|tp| tp.name() == "end_blit")
        .expect("end_blit registered");

    assert!(!start.has_payload());
    assert_eq!(start.toggle(), Some("blit"));
    assert_eq!(end.toggle(), Some("blit"));

    let names: Vec<&str> = end.payload().iter().map(|a| a.name()).collect();
    assert_eq!(names, ["uses_3d_blit", "src_format", "dst_format", "layers"]);

    assert!(reg.default_enabled().contains(&"blit".to_string()));
}

#[test]
fn test_binning_ib_scoped_event_shape() {
    let reg = tracepoints::build_registry().unwrap();

    for name in ["start_binning_ib", "end_binning_ib"] {
        let tp = reg
            .tracepoints()
            .iter()
            .find(|tp| tp.name() == name)
            .expect("pair registered");
        assert!(!tp.has_payload());
        assert_eq!(tp.toggle(), Some("binning_ib"));
    }
    assert!(reg.default_enabled().contains(&"binning_ib".to_string()));
}

#[test]
fn test_every_scoped_event_is_a_pair() {
    let reg = tracepoints::build_registry().unwrap();

    for toggle in reg.toggle_names() {
        let start = format!("start_{toggle}");
        let end = format!("end_{toggle}");
        assert!(reg.contains(&start), "missing {start}");
        assert!(reg.contains(&end), "missing {end}");

        let pair: Vec<_> = reg
            .tracepoints()
            .iter()
            .filter(|tp| tp.toggle() == Some(toggle))
            .collect();
        assert_eq!(pair.len(), 2, "toggle {toggle} must gate exactly two entries");
    }
}

#[test]
fn test_toggle_round_trip() {
    // The toggles derivable from the registry are exactly the declared
    // scoped event names, in declaration order.
    let reg = tracepoints::build_registry().unwrap();
    assert_eq!(
        reg.toggle_names(),
        vec![
            "render_pass",
            "binning_ib",
            "draw_ib_sysmem",
            "draw_ib_gmem",
            "gmem_clear",
            "sysmem_clear",
            "sysmem_clear_all",
            "gmem_load",
            "gmem_store",
            "sysmem_resolve",
            "blit",
            "compute",
        ]
    );
    let defaults: Vec<&str> = reg.default_enabled().iter().map(String::as_str).collect();
    assert_eq!(defaults, reg.toggle_names());
}

#[test]
fn test_converted_arguments_use_string_formats() {
    // A conversion expression maps the stored value to a display name, so
    // the format specifier must describe the converted type.
    let reg = tracepoints::build_registry().unwrap();
    for tp in reg.tracepoints() {
        for arg in tp.payload() {
            if arg.conversion().is_some() {
                assert_eq!(arg.c_format(), "%s", "{}: {}", tp.name(), arg.name());
            }
        }
    }
}

#[test]
fn test_capture_strategies_never_mixed() {
    let reg = tracepoints::build_registry().unwrap();
    for tp in reg.tracepoints() {
        assert!(
            tp.args().is_empty() || tp.record().is_empty(),
            "{} mixes inline arguments and a capture record",
            tp.name()
        );
    }
}

#[test]
fn test_redeclaring_a_driver_event_fails() {
    let mut reg = Registry::new("gpu");
    tracepoints::register_all(&mut reg).unwrap();

    let before = reg.len();
    assert!(ScopedEvent::new("compute").register(&mut reg).is_err());
    assert_eq!(reg.len(), before);
}
