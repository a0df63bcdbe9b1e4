mod common;

use common::seed_family;
use genbrowse_core::db::open_db_in_memory;
use genbrowse_core::{
    DetailService, RecordRef, RelationService, RepoError, SqliteMarriageRepository,
    SqlitePersonRepository,
};
use rusqlite::Connection;

fn detail_service(
    conn: &Connection,
) -> DetailService<SqlitePersonRepository<'_>, SqliteMarriageRepository<'_>> {
    DetailService::new(RelationService::new(
        SqlitePersonRepository::try_new(conn).unwrap(),
        SqliteMarriageRepository::try_new(conn).unwrap(),
    ))
}

#[test]
fn person_detail_collects_all_relationships() {
    let conn = open_db_in_memory().unwrap();
    let family = seed_family(&conn);
    let service = detail_service(&conn);

    let detail = service.person_detail(family.ivan).unwrap();
    assert_eq!(detail.label.as_deref(), Some("Иванов Иван Ильич, 1950 г.р."));

    let parents = detail.parents.expect("ivan has parents");
    assert_eq!(parents.father.id, family.ilya);
    assert_eq!(parents.mother.id, family.maria);

    let labels: Vec<_> = detail
        .marriages
        .iter()
        .map(|entry| entry.label.as_deref())
        .collect();
    assert_eq!(
        labels,
        vec![
            Some("Иванов И.И. - Петрова А.С., 1975"),
            Some("Иванов И.И. - Кузнецова (Орлова) О.Н., 1985"),
        ]
    );
    assert_eq!(detail.spouses.len(), 2);
    assert_eq!(detail.children.len(), 3);
}

#[test]
fn person_detail_tolerates_missing_dates() {
    let conn = open_db_in_memory().unwrap();
    let family = seed_family(&conn);
    let service = detail_service(&conn);

    let sergey = service.person_detail(family.sergey).unwrap();
    assert_eq!(sergey.label, None);
    assert_eq!(sergey.marriages.len(), 1);
    assert_eq!(sergey.marriages[0].spouse.id, family.anna);
    assert_eq!(sergey.marriages[0].label, None);
    assert_eq!(sergey.parents, None);
}

#[test]
fn marriage_detail_lists_spouses_and_children() {
    let conn = open_db_in_memory().unwrap();
    let family = seed_family(&conn);
    let service = detail_service(&conn);

    let detail = service.marriage_detail(family.ivan_anna).unwrap();
    assert_eq!(detail.husband.id, family.ivan);
    assert_eq!(detail.wife.id, family.anna);
    assert_eq!(detail.label.as_deref(), Some("Иванов И.И. - Петрова А.С., 1975"));
    let children: Vec<_> = detail.children.iter().map(|child| child.id).collect();
    assert_eq!(children, vec![family.kolya, family.katya]);

    let undated = service.marriage_detail(family.sergey_anna).unwrap();
    assert_eq!(undated.label, None);
}

#[test]
fn unknown_detail_ids_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = detail_service(&conn);

    let err = service.person_detail(1).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(RecordRef::Person(1))));
    assert_eq!(err.code(), "NOT_FOUND");
    assert!(matches!(
        service.marriage_detail(2),
        Err(RepoError::NotFound(RecordRef::Marriage(2)))
    ));
}

#[test]
fn detail_serializes_with_expected_wire_fields() {
    let conn = open_db_in_memory().unwrap();
    let family = seed_family(&conn);
    let service = detail_service(&conn);

    let json = serde_json::to_value(service.person_detail(family.ivan).unwrap()).unwrap();
    assert_eq!(json["person"]["id"], family.ivan);
    assert_eq!(json["person"]["sex"], "male");
    assert_eq!(json["person"]["birthdate"], "1950-05-01");
    assert_eq!(json["person"]["place_of_birth"], "Тверь");
    assert_eq!(json["parents"]["mother"]["maidenname"], "Смирнова");
    assert_eq!(json["marriages"][0]["marriage"]["date"], "1975-06-01");
    assert_eq!(json["marriages"][0]["spouse"]["id"], family.anna);

    let anna = serde_json::to_value(service.person_detail(family.anna).unwrap()).unwrap();
    assert!(anna["parents"].is_null());
    assert!(anna["person"]["date_of_death"].is_null());
}

#[test]
fn details_show_marriages_with_out_of_order_divorce_dates() {
    let conn = open_db_in_memory().unwrap();
    let family = seed_family(&conn);
    conn.execute(
        "UPDATE marriages SET divorce_date = '1900-01-01' WHERE id = ?1;",
        [family.ivan_anna],
    )
    .unwrap();
    let service = detail_service(&conn);

    let ivan = service.person_detail(family.ivan).unwrap();
    assert_eq!(ivan.marriages.len(), 2);
    assert_eq!(ivan.marriages[0].marriage.id, family.ivan_anna);

    let anna = service.person_detail(family.anna).unwrap();
    assert_eq!(anna.marriages.len(), 2);

    let kolya = service.person_detail(family.kolya).unwrap();
    let parents = kolya.parents.expect("kolya has parents");
    assert_eq!(parents.father.id, family.ivan);
    assert_eq!(parents.mother.id, family.anna);

    let marriage = service.marriage_detail(family.ivan_anna).unwrap();
    assert_eq!(marriage.label.as_deref(), Some("Иванов И.И. - Петрова А.С., 1975"));
}
