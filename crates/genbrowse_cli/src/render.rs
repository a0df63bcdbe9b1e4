//! Plain-text detail pages.

use genbrowse_core::{MarriageDetail, Person, PersonDetail};
use std::fmt::Display;

const UNKNOWN: &str = "неизвестно";

/// Renders the person page: record fields, parents, marriages, children.
pub fn person_page(detail: &PersonDetail) -> String {
    let person = &detail.person;
    let mut out = String::new();

    push_line(&mut out, heading(detail.label.as_deref(), person));
    push_field(&mut out, "Фамилия", &person.lastname);
    push_field(&mut out, "Предыдущая фамилия", &person.maidenname);
    push_field(&mut out, "Имя", &person.firstname);
    push_field(&mut out, "Отчество", &person.middlename);
    push_field(&mut out, "Пол", person.sex.display_name());
    push_field(&mut out, "Дата рождения", &format_date(person.birthdate));
    if person.date_of_death.is_some() {
        push_field(&mut out, "Дата смерти", &format_date(person.date_of_death));
    }
    push_field(&mut out, "Место рождения", &person.place_of_birth);

    if let Some(parents) = &detail.parents {
        push_line(&mut out, "\nРодители:");
        push_line(&mut out, format!("  Отец: {}", person_link(&parents.father)));
        push_line(&mut out, format!("  Мать: {}", person_link(&parents.mother)));
    }

    if !detail.marriages.is_empty() {
        push_line(&mut out, "\nБраки:");
        for entry in &detail.marriages {
            let title = entry
                .label
                .clone()
                .unwrap_or_else(|| "союз без даты".to_string());
            push_line(&mut out, format!("  {title} [{}]", entry.marriage.route()));
            push_line(&mut out, format!("    супруг(а): {}", person_link(&entry.spouse)));
            if let Some(divorced) = entry.marriage.date_of_divorce {
                push_line(&mut out, format!("    расторгнут: {divorced}"));
            }
        }
    }

    push_person_list(&mut out, "Дети", &detail.children);
    out.trim_end().to_string()
}

/// Renders the marriage page: spouses, dates, children.
pub fn marriage_page(detail: &MarriageDetail) -> String {
    let marriage = &detail.marriage;
    let mut out = String::new();

    let title = detail
        .label
        .clone()
        .unwrap_or_else(|| marriage.route());
    push_line(&mut out, title);
    push_field(&mut out, "Муж", &person_link(&detail.husband));
    push_field(&mut out, "Жена", &person_link(&detail.wife));
    push_field(&mut out, "Дата заключения", &format_date(marriage.date));
    if marriage.date_of_divorce.is_some() {
        push_field(&mut out, "Дата расторжения", &format_date(marriage.date_of_divorce));
    }

    push_person_list(&mut out, "Дети", &detail.children);
    out.trim_end().to_string()
}

fn heading(label: Option<&str>, person: &Person) -> String {
    match label {
        Some(label) => label.to_string(),
        None => full_name(person),
    }
}

fn full_name(person: &Person) -> String {
    [
        person.lastname.as_str(),
        person.firstname.as_str(),
        person.middlename.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ")
}

fn person_link(person: &Person) -> String {
    let name = person.display_label().unwrap_or_else(|_| full_name(person));
    format!("{name} [{}]", person.route())
}

fn push_field(out: &mut String, name: &str, value: &str) {
    if !value.is_empty() {
        push_line(out, format!("  {name}: {value}"));
    }
}

fn push_person_list(out: &mut String, title: &str, persons: &[Person]) {
    if persons.is_empty() {
        return;
    }
    push_line(out, format!("\n{title}:"));
    for person in persons {
        push_line(out, format!("  {}", person_link(person)));
    }
}

fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

/// ISO date or the "unknown" placeholder.
fn format_date<D: Display>(date: Option<D>) -> String {
    date.map_or_else(|| UNKNOWN.to_string(), |date| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::{marriage_page, person_page};
    use chrono::NaiveDate;
    use genbrowse_core::{
        MarriageDetail, MarriageEntry, NewMarriage, NewPerson, Parents, Person, PersonDetail, Sex,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ivan() -> Person {
        NewPerson::new(Sex::Male, "Иванов", "Иван", "Ильич")
            .born(date(1950, 5, 1))
            .into_person(1)
    }

    fn anna() -> Person {
        NewPerson::new(Sex::Female, "Петрова", "Анна", "Сергеевна").into_person(2)
    }

    #[test]
    fn person_page_lists_relationships_with_routes() {
        let marriage = NewMarriage::new(1, 2).on(date(1975, 6, 1)).into_marriage(3);
        let child = NewPerson::new(Sex::Female, "Иванова", "Екатерина", "Ивановна")
            .born(date(1978, 10, 15))
            .child_of(3)
            .into_person(4);
        let detail = PersonDetail {
            label: ivan().display_label().ok(),
            person: ivan(),
            parents: Some(Parents {
                father: NewPerson::new(Sex::Male, "Иванов", "Илья", "Петрович").into_person(5),
                mother: NewPerson::new(Sex::Female, "Иванова", "Мария", "").into_person(6),
            }),
            spouses: vec![anna()],
            marriages: vec![MarriageEntry {
                label: marriage.display_label(&ivan(), &anna()).ok(),
                marriage,
                spouse: anna(),
            }],
            children: vec![child],
        };

        let page = person_page(&detail);
        assert!(page.starts_with("Иванов Иван Ильич, 1950 г.р.\n"));
        assert!(page.contains("  Пол: мужской"));
        assert!(page.contains("1950-05-01\n\nРодители:\n  Отец: "));
        assert!(page.contains("\n\nБраки:\n"));
        assert!(page.contains("\n\nДети:\n"));
        assert!(page.contains("  Дата рождения: 1950-05-01"));
        assert!(!page.contains("Дата смерти"));
        assert!(page.contains("  Отец: Иванов Илья Петрович [person/5]"));
        assert!(page.contains("  Иванов И.И. - Петрова А.С., 1975 [marriage/3]"));
        assert!(page.contains("    супруг(а): Петрова Анна Сергеевна [person/2]"));
        assert!(page.ends_with("  Иванова Екатерина Ивановна, 1978 г.р. [person/4]"));
    }

    #[test]
    fn marriage_page_falls_back_without_date() {
        let detail = MarriageDetail {
            marriage: NewMarriage::new(1, 2).into_marriage(3),
            label: None,
            husband: ivan(),
            wife: anna(),
            children: Vec::new(),
        };

        let page = marriage_page(&detail);
        assert!(page.starts_with("marriage/3\n"));
        assert!(page.contains("  Муж: Иванов Иван Ильич, 1950 г.р. [person/1]"));
        assert!(page.contains("  Дата заключения: неизвестно"));
        assert!(!page.contains("Дети"));
    }
}
