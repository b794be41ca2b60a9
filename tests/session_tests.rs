use chrono::{TimeZone, Utc};
use costlens::registry::parse_cost_records;
use costlens::{CostRelevance, CostSession, FileId, OccurrenceKey, Whitelist};
use indoc::indoc;
use pretty_assertions::assert_eq;

const SNAPSHOT: &str = indoc! {"
    public class Sorter {
        public void sort(int[] values) {
            swap(values, 0, 1);
        }

        private void swap(int[] values, int i, int j) {
            int t = values[i];
            values[i] = values[j];
            values[j] = t;
        }
    }
"};

const REPORT: &str = r#"[
    {"method_name": "void Sorter.sort(int[])", "parameters": ["int[]"],
     "exec_cost": {"degree": 1, "polynomial": "n", "big_o": "O(n)"}},
    {"method_name": "void Sorter.swap(int[],int,int)", "parameters": ["int[]", "int", "int"],
     "exec_cost": {"degree": 0, "polynomial": "3", "big_o": "O(1)"}}
]"#;

fn session_with_snapshot(relevance: CostRelevance) -> (CostSession, FileId) {
    let mut session = CostSession::new(Whitelist::new(), relevance);
    session.enable();
    let file = FileId::new("Sorter.java");
    let records = parse_cost_records(REPORT).unwrap();
    session.record_analysis(
        &file,
        SNAPSHOT,
        &records,
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    );
    (session, file)
}

#[test]
fn test_constant_methods_stay_out_of_registry() {
    let (session, _) = session_with_snapshot(CostRelevance::NonConstant);
    assert!(session.registry().contains("sort"));
    assert!(!session.registry().contains("swap"));

    let (session, _) = session_with_snapshot(CostRelevance::AnyReported);
    assert!(session.registry().contains("swap"));
}

#[test]
fn test_call_to_costly_method_flags_caller() {
    let (mut session, file) = session_with_snapshot(CostRelevance::NonConstant);
    let saved = SNAPSHOT.replace(
        "        values[j] = t;\n",
        "        values[j] = t;\n        sort(values);\n",
    );

    let outcome = session.check_save(&file, &saved);
    assert!(outcome.is_significant());
    assert!(outcome.state_changed);
    assert!(session
        .state()
        .is_flagged(&file, &OccurrenceKey::new("swap", 0)));
    assert_eq!(
        session.state().cause_methods_for_name(&file, "swap"),
        vec!["sort".to_string()]
    );
}

#[test]
fn test_saving_the_snapshot_again_clears_flags() {
    let (mut session, file) = session_with_snapshot(CostRelevance::NonConstant);
    let saved = SNAPSHOT.replace("swap(values, 0, 1);", "for (int v : values) swap(values, 0, v);");
    assert!(session.check_save(&file, &saved).is_significant());

    let outcome = session.check_save(&file, SNAPSHOT);
    assert!(!outcome.is_significant());
    assert!(outcome.state_changed);
    assert!(session.state().flags_for(&file).is_none());
}

#[test]
fn test_new_measurement_records_history_with_causes() {
    let (mut session, file) = session_with_snapshot(CostRelevance::NonConstant);
    let saved = SNAPSHOT.replace("swap(values, 0, 1);", "for (int v : values) swap(values, 0, v);");
    session.check_save(&file, &saved);

    let report = parse_cost_records(
        r#"[{"method_name": "void Sorter.sort(int[])", "parameters": ["int[]"],
             "exec_cost": {"degree": 2, "polynomial": "n^2", "big_o": "O(n^2)"}}]"#,
    )
    .unwrap();
    session.record_analysis(
        &file,
        &saved,
        &report,
        Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap(),
    );

    let entries = session.history().entries("Sorter.java:sort(int[])");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].exec_cost.big_o, "O(n^2)");
    assert_eq!(entries[0].change_cause_methods, Some(vec!["for".to_string()]));
    assert_eq!(entries[1].change_cause_methods, None);
    assert!(session.state().is_empty());
}

#[test]
fn test_whitelisted_call_is_ignored_by_session() {
    let (mut session, file) = session_with_snapshot(CostRelevance::NonConstant);
    session.whitelist_mut().add("sort").unwrap();
    let saved = SNAPSHOT.replace(
        "        values[j] = t;\n",
        "        values[j] = t;\n        sort(values);\n",
    );
    assert!(!session.check_save(&file, &saved).is_significant());
}

#[test]
fn test_declarations_for_annotation_placement() {
    let session = CostSession::default();
    let decls = session.declarations(SNAPSHOT);
    let signatures: Vec<String> = decls.iter().map(|d| d.signature()).collect();
    assert_eq!(signatures, vec!["sort(int[])", "swap(int[],int,int)"]);
}
