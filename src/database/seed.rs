use chrono::NaiveDate;
use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::models::StudentData;
use crate::database::store::Store;

/// Default login accounts
pub const SEED_USERS: &[(&str, &str)] = &[("admin", "admin123"), ("user", "user123")];

type SeedRow = (&'static str, i32, i32, f64, &'static str, &'static str, &'static str, (i32, u32, u32));

/// Reference students: nome, idade, serie, notaMedia, endereco, nomePai, nomeMae, (y, m, d)
const SEED_STUDENTS: &[SeedRow] = &[
    ("Alice", 10, 5, 8.5, "123 Main St", "John Doe", "Jane Doe", (2013, 5, 15)),
    ("Bob", 11, 6, 7.2, "456 Oak St", "Bob Smith", "Alice Smith", (2012, 8, 21)),
    ("Charlie", 9, 4, 9.0, "789 Pine St", "Charlie Brown", "Lucy Brown", (2014, 2, 10)),
    ("David", 10, 5, 8.8, "101 Cedar St", "David Johnson", "Emily Johnson", (2013, 7, 18)),
    ("Emma", 11, 6, 7.5, "202 Elm St", "Michael White", "Sophia White", (2012, 10, 5)),
    ("Frank", 9, 4, 9.2, "303 Maple St", "Frank Williams", "Grace Williams", (2014, 1, 22)),
    ("Grace", 10, 5, 8.0, "404 Birch St", "George Taylor", "Olivia Taylor", (2013, 4, 30)),
    ("Henry", 11, 6, 7.8, "505 Spruce St", "Henry Moore", "Lily Moore", (2012, 9, 14)),
    ("Isabel", 9, 4, 9.5, "606 Walnut St", "Isaac Davis", "Ava Davis", (2014, 3, 7)),
    ("Jack", 10, 5, 7.9, "707 Sycamore St", "Jack Smith", "Emma Smith", (2013, 6, 19)),
    ("Katherine", 11, 6, 8.3, "808 Cedar St", "James Martin", "Sophia Martin", (2012, 11, 28)),
    ("Liam", 9, 4, 9.1, "909 Oak St", "Liam Turner", "Ella Turner", (2014, 2, 1)),
    ("Mia", 10, 5, 8.7, "1010 Maple St", "Ryan Brown", "Mia Brown", (2013, 5, 12)),
    ("Nathan", 11, 6, 7.4, "1111 Birch St", "Nathan Harris", "Eva Harris", (2012, 8, 3)),
    ("Olivia", 9, 4, 9.3, "1212 Pine St", "Daniel Green", "Olivia Green", (2014, 1, 9)),
    ("Peter", 10, 5, 8.4, "1313 Elm St", "Peter Clark", "Ava Clark", (2013, 4, 18)),
    ("Quinn", 11, 6, 7.1, "1414 Cedar St", "Quinn Davis", "Grace Davis", (2012, 9, 27)),
    ("Rachel", 9, 4, 9.4, "1515 Walnut St", "Richard White", "Rachel White", (2014, 2, 14)),
    ("Sam", 10, 5, 8.6, "1616 Sycamore St", "Sam Turner", "Emily Turner", (2013, 6, 6)),
    ("Tristan", 11, 6, 7.7, "1717 Spruce St", "Tristan Harris", "Lily Harris", (2012, 11, 23)),
    ("Uma", 9, 4, 9.6, "1818 Maple St", "Uma Smith", "Sophia Smith", (2014, 3, 30)),
    ("Victor", 10, 5, 8.2, "1919 Oak St", "Victor Martin", "Ella Martin", (2013, 5, 24)),
    ("Wendy", 11, 6, 7.0, "2020 Pine St", "Wendy Brown", "Michael Brown", (2012, 10, 10)),
    ("Xander", 9, 4, 9.7, "2121 Birch St", "Xander Turner", "Sophia Turner", (2014, 1, 17)),
    ("Yara", 10, 5, 8.1, "2222 Elm St", "Yara Davis", "John Davis", (2013, 4, 4)),
    ("Zane", 11, 6, 7.3, "2323 Cedar St", "Zane Harris", "Lily Harris", (2012, 9, 8)),
    ("Aaron", 9, 4, 9.8, "2424 Walnut St", "Aaron Smith", "Sophia Smith", (2014, 2, 21)),
    ("Bella", 10, 5, 8.9, "2525 Sycamore St", "Bella Martin", "Ella Martin", (2013, 6, 14)),
    ("Carlos", 11, 6, 7.6, "2626 Spruce St", "Carlos Turner", "Emily Turner", (2012, 11, 5)),
    ("Diana", 9, 4, 9.9, "2727 Maple St", "Diana White", "Michael White", (2014, 3, 18)),
    ("Ethan", 10, 5, 8.8, "2828 Oak St", "Ethan Brown", "Sophia Brown", (2013, 4, 23)),
    ("Fiona", 11, 6, 7.5, "2929 Pine St", "Fiona Harris", "John Harris", (2012, 10, 16)),
    ("Gavin", 9, 4, 9.2, "3030 Birch St", "Gavin Smith", "Olivia Smith", (2014, 1, 3)),
    ("Holly", 10, 5, 8.0, "3131 Cedar St", "Holly Davis", "Daniel Davis", (2013, 5, 29)),
    ("Ian", 11, 6, 7.8, "3232 Elm St", "Ian Turner", "Sophia Turner", (2012, 9, 20)),
    ("Jenna", 9, 4, 9.5, "3333 Sycamore St", "Jenna Martin", "Ella Martin", (2014, 2, 26)),
    ("Kevin", 10, 5, 8.4, "3434 Spruce St", "Kevin Harris", "Lily Harris", (2013, 6, 9)),
    ("Lila", 11, 6, 7.2, "3535 Maple St", "Lila White", "Michael White", (2012, 8, 14)),
    ("Mark", 9, 4, 9.3, "3636 Oak St", "Mark Brown", "Sophia Brown", (2014, 1, 12)),
    ("Nina", 10, 5, 8.7, "3737 Pine St", "Nina Smith", "Olivia Smith", (2013, 5, 17)),
    ("Oscar", 11, 6, 7.9, "3838 Birch St", "Oscar Turner", "Emily Turner", (2012, 9, 30)),
    ("Paula", 9, 4, 9.4, "3939 Elm St", "Paula Harris", "John Harris", (2014, 3, 11)),
    ("Quincy", 10, 5, 8.1, "4040 Cedar St", "Quincy Davis", "Daniel Davis", (2013, 4, 1)),
    ("Ruby", 11, 6, 7.7, "4141 Sycamore St", "Ruby Martin", "Ella Martin", (2012, 11, 30)),
    ("Steve", 9, 4, 9.6, "4242 Spruce St", "Steve White", "Michael White", (2014, 2, 4)),
    ("Tina", 10, 5, 8.3, "4343 Maple St", "Tina Brown", "Sophia Brown", (2013, 5, 8)),
    ("Ursula", 11, 6, 7.1, "4444 Oak St", "Ursula Smith", "Olivia Smith", (2012, 8, 27)),
    ("Vince", 9, 4, 9.1, "4545 Pine St", "Vince Turner", "Emily Turner", (2014, 1, 20)),
    ("Wes", 10, 5, 8.9, "4646 Birch St", "Wes Harris", "Lily Harris", (2013, 4, 27)),
    ("Xena", 11, 6, 7.4, "4747 Elm St", "Xena Davis", "John Davis", (2012, 9, 13)),
    ("Yvonne", 9, 4, 9.7, "4848 Sycamore St", "Yvonne Martin", "Ella Martin", (2014, 3, 24)),
    ("Zach", 10, 5, 8.2, "4949 Spruce St", "Zach White", "Michael White", (2013, 5, 3)),
];

pub fn seed_students() -> Vec<StudentData> {
    SEED_STUDENTS
        .iter()
        .filter_map(|&(nome, idade, serie, nota_media, endereco, nome_pai, nome_mae, (y, m, d))| {
            Some(StudentData {
                nome: nome.to_string(),
                idade,
                serie,
                nota_media,
                endereco: endereco.to_string(),
                nome_pai: nome_pai.to_string(),
                nome_mae: nome_mae.to_string(),
                data_nascimento: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect()
}

/// Outcome of a seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { users: usize, students: usize },
    AlreadyPopulated,
}

/// Populate an empty store with the default accounts and reference students.
/// A store that already holds any student is left untouched. The check and the
/// inserts run as one unit inside the store.
pub async fn seed_if_empty(store: &dyn Store) -> Result<SeedOutcome, DatabaseError> {
    let students = seed_students();
    let count = students.len();

    if !store.seed(SEED_USERS, students).await? {
        info!("Seed skipped: students table already populated");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    info!("Seeded {} users and {} students", SEED_USERS.len(), count);
    Ok(SeedOutcome::Seeded {
        users: SEED_USERS.len(),
        students: count,
    })
}
