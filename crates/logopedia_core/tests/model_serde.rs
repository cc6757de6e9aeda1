use chrono::NaiveDate;
use logopedia_core::{Answer, Child, Examination, Language};

#[test]
fn child_serialization_uses_iso_dates_and_null_optionals() {
    let child = Child {
        id: 7,
        first_name: "Anna".to_string(),
        last_name: "Kowalska".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
        gender: None,
        notes: Some("lisps on s".to_string()),
    };

    let json = serde_json::to_value(&child).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["first_name"], "Anna");
    assert_eq!(json["birth_date"], "2018-01-01");
    assert!(json["gender"].is_null());
    assert_eq!(json["notes"], "lisps on s");

    let decoded: Child = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, child);
}

#[test]
fn examination_round_trips_with_absent_fields() {
    let examination = Examination {
        id: 3,
        child_id: 7,
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        exam_type: Some("screening".to_string()),
        conclusions: None,
    };

    let json = serde_json::to_value(&examination).unwrap();
    assert_eq!(json["child_id"], 7);
    assert_eq!(json["date"], "2024-03-01");
    assert_eq!(json["exam_type"], "screening");
    assert!(json["conclusions"].is_null());

    let decoded: Examination = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.conclusions, None);
    assert_eq!(decoded, examination);
}

#[test]
fn answer_round_trips() {
    let answer = Answer {
        id: 11,
        examination_id: 3,
        question_id: "r_articulation".to_string(),
        answer_value: "substitution".to_string(),
    };

    let json = serde_json::to_value(&answer).unwrap();
    assert_eq!(json["examination_id"], 3);
    assert_eq!(json["question_id"], "r_articulation");

    let decoded: Answer = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, answer);
}

#[test]
fn deserialize_rejects_malformed_birth_date() {
    let value = serde_json::json!({
        "id": 1,
        "first_name": "Anna",
        "last_name": "Kowalska",
        "birth_date": "01.01.2018",
        "gender": null,
        "notes": null,
    });
    assert!(serde_json::from_value::<Child>(value).is_err());
}

#[test]
fn language_uses_lowercase_codes() {
    assert_eq!(serde_json::to_value(Language::Pl).unwrap(), "pl");
    let decoded: Language = serde_json::from_value(serde_json::json!("en")).unwrap();
    assert_eq!(decoded, Language::En);
    assert!(serde_json::from_value::<Language>(serde_json::json!("de")).is_err());
}
