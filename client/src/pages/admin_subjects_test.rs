use super::*;

#[test]
fn subject_draft_requires_name() {
    assert_eq!(subject_draft("  ", "MAT1", "1"), Err("A subject needs a name."));
}

#[test]
fn subject_draft_drops_blank_optionals() {
    let draft = subject_draft(" Cálculo ", "", " 2 ").expect("valid");
    assert_eq!(draft, SubjectDraft { name: "Cálculo".to_owned(), code: None, semester: Some("2".to_owned()) });
    assert_eq!(serde_json::to_value(&draft).expect("json"), serde_json::json!({"nombre": "Cálculo", "semestre": "2"}));
}

#[test]
fn sorted_orders_case_insensitively() {
    let list: Vec<Subject> = serde_json::from_value(serde_json::json!([
        {"id": 1, "nombre": "redes"},
        {"id": 2, "nombre": "Algebra"},
        {"id": 3, "nombre": "Bases de datos"}
    ]))
    .expect("subjects");
    let ids: Vec<u64> = sorted(&list).iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}
