use super::*;
use std::io::Write;
use tennis_core::DEFAULT_MENTAL_TOUGHNESS;

const HEADER: &str = "name,seed,style,serve_pct,return_pct\n";

#[test]
fn test_reads_valid_roster() {
    let csv = format!(
        "{}Sinner,1,aggressive baseline,0.69,0.42\nAlcaraz, 2 ,all-court,0.68,0.43\n",
        HEADER
    );
    let roster = read_roster(csv.as_bytes()).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[1].name(), "Alcaraz");
    assert_eq!(roster[1].seed(), 2);
    assert_eq!(roster[1].style(), "all-court");
    assert_eq!(roster[0].serve_pct(), 0.69);
}

#[test]
fn test_non_numeric_seed_reports_line() {
    let csv = format!("{}Sinner,1,baseline,0.69,0.42\nAlcaraz,two,all-court,0.68,0.43\n", HEADER);
    let err = read_roster(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, RosterError::Malformed { line: 3, .. }));
}

#[test]
fn test_missing_field_is_malformed() {
    let csv = format!("{}Sinner,1,baseline,0.69\n", HEADER);
    let err = read_roster(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, RosterError::Malformed { line: 2, .. }));
}

#[test]
fn test_out_of_range_rating_is_invalid() {
    let csv = format!("{}Sinner,1,baseline,69,0.42\n", HEADER);
    let err = read_roster(csv.as_bytes()).unwrap_err();
    match err {
        RosterError::Invalid { line, source } => {
            assert_eq!(line, 2);
            assert!(matches!(source, ConfigError::RatingOutOfRange { field: "serve_pct", .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_duplicate_name_is_invalid() {
    let csv = format!("{}Ruud,6,clay,0.64,0.38\nRuud,7,clay,0.64,0.38\n", HEADER);
    let err = read_roster(csv.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        RosterError::Invalid {
            line: 3,
            source: ConfigError::DuplicateName(_)
        }
    ));
}

#[test]
fn test_duplicate_seeds_are_allowed() {
    let csv = format!("{}Ruud,6,clay,0.64,0.38\nFritz,6,big-serve,0.70,0.34\n", HEADER);
    assert_eq!(read_roster(csv.as_bytes()).unwrap().len(), 2);
}

#[test]
fn test_negative_seed_is_accepted() {
    let csv = format!(
        "{}Sinner,-1,aggressive baseline,0.69,0.42\nAlcaraz,0,all-court,0.68,0.43\n",
        HEADER
    );
    let roster = read_roster(csv.as_bytes()).unwrap();
    assert_eq!(roster[0].seed(), -1);
    assert_eq!(roster[1].seed(), 0);
}

#[test]
fn test_optional_mental_toughness_column() {
    let csv = "name,seed,style,serve_pct,return_pct,mental_toughness\n\
               Djokovic,1,all-court,0.68,0.45,0.95\n\
               Rune,2,aggressive baseline,0.64,0.40,\n";
    let roster = read_roster(csv.as_bytes()).unwrap();
    assert_eq!(roster[0].mental_toughness(), 0.95);
    assert_eq!(roster[1].mental_toughness(), DEFAULT_MENTAL_TOUGHNESS);

    let bad = "name,seed,style,serve_pct,return_pct,mental_toughness\n\
               Rune,2,baseline,0.64,0.40,2\n";
    let err = read_roster(bad.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        RosterError::Invalid {
            line: 2,
            source: ConfigError::RatingOutOfRange {
                field: "mental_toughness",
                ..
            }
        }
    ));
}

#[test]
fn test_load_roster_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}Shelton,14,big-serve,0.72,0.33", HEADER).unwrap();

    let roster = load_roster(file.path()).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name(), "Shelton");

    let err = load_roster(Path::new("/nonexistent/players.csv")).unwrap_err();
    assert!(matches!(err, RosterError::Open { .. }));
}
