use std::fs::{self};

use startrace::{build_pattern, render_descriptor};
use walkdir::WalkDir;

const SAMPLES: usize = 5;

#[test]
fn demo_descriptors_build_and_render() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let mut pattern =
            build_pattern(&content).unwrap_or_else(|e| panic!("Demo {path:?} failed to build: {e}"));
        let samples = pattern.positions()
                             .and_then(|n| usize::try_from(n).ok())
                             .map_or(SAMPLES, |n| n.min(SAMPLES));
        let rendered = pattern.renderings(samples)
                              .unwrap_or_else(|e| panic!("Demo {path:?} failed to render: {e}"));

        assert!(rendered.iter().all(|line| !line.is_empty()), "{path:?} rendered an empty line");
        count += 1;
    }

    assert!(count > 0, "No demo descriptors found in demos/");
}

fn demo(name: &str) -> String {
    let path = format!("demos/{name}.json");
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

#[test]
fn file_sequence_counts_in_order() {
    let rendered = render_descriptor(&demo("file_sequence"), 31).unwrap();
    assert_eq!(rendered[0], "file_00");
    assert_eq!(rendered[10], "file_10");
    assert_eq!(rendered[29], "file_29");
    assert_eq!(rendered[30], "file_00");
}

#[test]
fn backups_rotate() {
    assert_eq!(render_descriptor(&demo("backups"), 4).unwrap(),
               ["backup_A", "backup_B", "backup_C", "backup_A"]);
}

#[test]
fn site_sensors_read_the_global_context() {
    assert_eq!(render_descriptor(&demo("site_sensors"), 3).unwrap(),
               ["north-80-min", "north-80-max", "north-80-min"]);
}

#[test]
fn countdown_steps_down_by_quarters() {
    assert_eq!(render_descriptor(&demo("countdown"), 5).unwrap(),
               ["t-1.0", "t-0.75", "t-0.5", "t-0.25", "t-0.0"]);
}
