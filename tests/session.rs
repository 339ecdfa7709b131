use std::path::PathBuf;

use pigbot::{Action, PigError, PigState, Session, state_count};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pigbot-{}-{name}", std::process::id()))
}

#[test]
fn unsolved_session_rejects_queries_and_exports() {
    let session = Session::default();
    assert!(!session.is_solved());
    assert!(matches!(session.query(0, 0, 0), Err(PigError::Unsolved)));
    assert!(matches!(
        session.write_csv(Vec::new()),
        Err(PigError::Unsolved)
    ));
    assert!(matches!(
        session.save_snapshot(&temp_path("never.bin")),
        Err(PigError::Unsolved)
    ));
}

#[test]
fn invalid_configuration_keeps_previous_solution() -> Result<(), PigError> {
    let mut session = Session::default();
    session.solve_new(6, 12)?;
    assert!(matches!(
        session.solve_new(1, 12),
        Err(PigError::InvalidConfiguration(_))
    ));
    assert_eq!(session.solution()?.settings().target, 12);
    Ok(())
}

#[test]
fn query_reports_negative_coordinates() -> Result<(), PigError> {
    let mut session = Session::default();
    session.solve_new(6, 12)?;
    assert!(matches!(
        session.query(-1, 0, 0),
        Err(PigError::StateOutOfRange { own: -1, .. })
    ));
    assert!(matches!(
        session.query(0, 0, -4),
        Err(PigError::StateOutOfRange { turn: -4, .. })
    ));
    let decided = session.query(50, 3, 0)?;
    assert_eq!(decided.win_probability, 1.0);
    assert_eq!(decided.action, Action::Hold);
    let lost = session.query(3, 12, 0)?;
    assert_eq!(lost.win_probability, 0.0);
    assert_eq!(lost.action, Action::Hold);
    Ok(())
}

#[test]
fn csv_export_lists_every_reachable_state() -> Result<(), PigError> {
    let target = 15u32;
    let mut session = Session::default();
    session.solve_new(4, target)?;
    let mut buf = Vec::new();
    let records = session.write_csv(&mut buf)?;
    let expected: usize = (0..target).map(|i| ((target - i) * target) as usize).sum();
    assert_eq!(records, expected);
    assert_eq!(Some(records), state_count(target));

    let text = String::from_utf8(buf).expect("csv is utf-8");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("i,j,k,roll,p"));
    let mut rows = 0usize;
    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5, "{line}");
        let i: u32 = fields[0].parse().unwrap();
        let k: u32 = fields[2].parse().unwrap();
        assert!(i + k < target);
        assert!(fields[3] == "0" || fields[3] == "1");
        let p: f64 = fields[4].parse().unwrap();
        assert!((0.0..=1.0).contains(&p));
        assert_eq!(fields[4].split('.').nth(1).map(str::len), Some(6));
        rows += 1;
    }
    assert_eq!(rows, expected);
    Ok(())
}

#[test]
fn snapshots_round_trip_through_files() -> Result<(), PigError> {
    let mut session = Session::default();
    session.solve_new(5, 18)?;
    let path = temp_path("snapshot.bin");
    session.save_snapshot(&path)?;

    let mut restored = Session::default();
    restored.load_snapshot(&path)?;
    let _ = std::fs::remove_file(&path);

    let original = session.solution()?;
    let loaded = restored.solution()?;
    assert_eq!(loaded.settings(), original.settings());
    assert_eq!(loaded.values(), original.values());
    assert_eq!(loaded.policy(), original.policy());
    let state = PigState::new(3, 9, 4);
    assert_eq!(loaded.evaluate(state), original.evaluate(state));
    Ok(())
}

#[test]
fn csv_file_is_written_to_disk() -> Result<(), PigError> {
    let mut session = Session::default();
    session.solve_new(3, 6)?;
    let path = temp_path("solution.csv");
    let records = session.save_csv(&path)?;
    let text = std::fs::read_to_string(&path)?;
    let _ = std::fs::remove_file(&path);
    assert_eq!(text.lines().count(), records + 1);
    Ok(())
}
