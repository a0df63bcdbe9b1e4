#![allow(dead_code)]

use chrono::NaiveDate;
use genbrowse_core::{
    MarriageId, MarriageRepository, NewMarriage, NewPerson, PersonId, PersonRepository, Sex,
    SqliteMarriageRepository, SqlitePersonRepository,
};
use rusqlite::Connection;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Three generations with out-of-order and undated marriages.
///
/// - `ilya` + `maria` (1945) -> `ivan`
/// - `ivan` + `olga` (1985, inserted first) -> `kira`
/// - `ivan` + `anna` (1975) -> `kolya`, `katya`
/// - `sergey` + `anna` (undated) -> `lena`
/// - `pavel` has no marriages.
pub struct Family {
    pub ilya: PersonId,
    pub maria: PersonId,
    pub ivan: PersonId,
    pub anna: PersonId,
    pub olga: PersonId,
    pub sergey: PersonId,
    pub pavel: PersonId,
    pub kolya: PersonId,
    pub katya: PersonId,
    pub kira: PersonId,
    pub lena: PersonId,
    pub grandparents_marriage: MarriageId,
    pub ivan_olga: MarriageId,
    pub ivan_anna: MarriageId,
    pub sergey_anna: MarriageId,
}

impl Family {
    pub fn all_persons(&self) -> Vec<PersonId> {
        vec![
            self.ilya, self.maria, self.ivan, self.anna, self.olga, self.sergey, self.pavel,
            self.kolya, self.katya, self.kira, self.lena,
        ]
    }
}

pub fn seed_family(conn: &Connection) -> Family {
    let persons = SqlitePersonRepository::try_new(conn).unwrap();
    let marriages = SqliteMarriageRepository::try_new(conn).unwrap();

    let ilya = persons
        .create_person(&NewPerson::new(Sex::Male, "Иванов", "Илья", "Петрович").born(date(1921, 2, 3)))
        .unwrap();
    let mut maria_draft =
        NewPerson::new(Sex::Female, "Иванова", "Мария", "Павловна").born(date(1924, 8, 19));
    maria_draft.maidenname = "Смирнова".to_string();
    let maria = persons.create_person(&maria_draft).unwrap();
    let grandparents_marriage = marriages
        .create_marriage(&NewMarriage::new(ilya, maria).on(date(1945, 9, 1)))
        .unwrap();

    let mut ivan_draft = NewPerson::new(Sex::Male, "Иванов", "Иван", "Ильич")
        .born(date(1950, 5, 1))
        .child_of(grandparents_marriage);
    ivan_draft.place_of_birth = "Тверь".to_string();
    let ivan = persons.create_person(&ivan_draft).unwrap();
    let anna = persons
        .create_person(&NewPerson::new(Sex::Female, "Петрова", "Анна", "Сергеевна").born(date(1953, 1, 20)))
        .unwrap();
    let mut olga_draft =
        NewPerson::new(Sex::Female, "Кузнецова", "Ольга", "Николаевна").born(date(1955, 7, 7));
    olga_draft.maidenname = "Орлова".to_string();
    let olga = persons.create_person(&olga_draft).unwrap();
    let sergey = persons
        .create_person(&NewPerson::new(Sex::Male, "Сидоров", "Сергей", "Андреевич"))
        .unwrap();
    let pavel = persons
        .create_person(&NewPerson::new(Sex::Male, "Орлов", "Павел", "").born(date(1960, 1, 1)))
        .unwrap();

    let ivan_olga = marriages
        .create_marriage(&NewMarriage::new(ivan, olga).on(date(1985, 3, 10)))
        .unwrap();
    let ivan_anna = marriages
        .create_marriage(
            &NewMarriage::new(ivan, anna)
                .on(date(1975, 6, 1))
                .divorced_on(date(1982, 11, 30)),
        )
        .unwrap();
    let sergey_anna = marriages
        .create_marriage(&NewMarriage::new(sergey, anna))
        .unwrap();

    let kolya = persons
        .create_person(
            &NewPerson::new(Sex::Male, "Иванов", "Николай", "Иванович")
                .born(date(1976, 4, 2))
                .child_of(ivan_anna),
        )
        .unwrap();
    let kira = persons
        .create_person(
            &NewPerson::new(Sex::Female, "Иванова", "Кира", "Ивановна")
                .born(date(1987, 12, 24))
                .child_of(ivan_olga),
        )
        .unwrap();
    let katya = persons
        .create_person(
            &NewPerson::new(Sex::Female, "Иванова", "Екатерина", "Ивановна")
                .born(date(1978, 10, 15))
                .child_of(ivan_anna),
        )
        .unwrap();
    let lena = persons
        .create_person(
            &NewPerson::new(Sex::Female, "Сидорова", "Елена", "Сергеевна").child_of(sergey_anna),
        )
        .unwrap();

    Family {
        ilya,
        maria,
        ivan,
        anna,
        olga,
        sergey,
        pavel,
        kolya,
        katya,
        kira,
        lena,
        grandparents_marriage,
        ivan_olga,
        ivan_anna,
        sergey_anna,
    }
}
