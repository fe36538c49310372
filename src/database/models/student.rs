use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

/// Stored student record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i32,
    pub nome: String,
    pub idade: i32,
    pub serie: i32,
    pub nota_media: f64,
    pub endereco: String,
    pub nome_pai: String,
    pub nome_mae: String,
    #[serde(with = "birth_date")]
    pub data_nascimento: NaiveDate,
}

/// Validated student fields, everything except the server-owned id
#[derive(Debug, Clone, PartialEq)]
pub struct StudentData {
    pub nome: String,
    pub idade: i32,
    pub serie: i32,
    pub nota_media: f64,
    pub endereco: String,
    pub nome_pai: String,
    pub nome_mae: String,
    pub data_nascimento: NaiveDate,
}

impl Student {
    pub fn from_data(id: i32, data: StudentData) -> Self {
        Self {
            id,
            nome: data.nome,
            idade: data.idade,
            serie: data.serie,
            nota_media: data.nota_media,
            endereco: data.endereco,
            nome_pai: data.nome_pai,
            nome_mae: data.nome_mae,
            data_nascimento: data.data_nascimento,
        }
    }

    /// Replace every mutable field; the id is kept
    pub fn overwrite(&mut self, data: StudentData) {
        let id = self.id;
        *self = Student::from_data(id, data);
    }
}

/// Request body for create and update. Every field is optional at the wire
/// level so that missing fields are reported together instead of failing on
/// the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub id: Option<i32>,
    pub nome: Option<String>,
    pub idade: Option<i32>,
    pub serie: Option<i32>,
    pub nota_media: Option<f64>,
    pub endereco: Option<String>,
    pub nome_pai: Option<String>,
    pub nome_mae: Option<String>,
    #[serde(default, deserialize_with = "birth_date::deserialize_opt")]
    pub data_nascimento: Option<NaiveDate>,
}

const REQUIRED: &str = "This field is required";

impl StudentPayload {
    /// Check field presence and produce the validated record fields.
    /// Errors map wire field names to messages.
    pub fn validate(self) -> Result<StudentData, BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();

        let nome = required_text("nome", self.nome, &mut errors);
        let endereco = required_text("endereco", self.endereco, &mut errors);
        let nome_pai = required_text("nomePai", self.nome_pai, &mut errors);
        let nome_mae = required_text("nomeMae", self.nome_mae, &mut errors);
        let idade = required("idade", self.idade, &mut errors);
        let serie = required("serie", self.serie, &mut errors);
        let nota_media = required("notaMedia", self.nota_media, &mut errors);
        let data_nascimento = required("dataNascimento", self.data_nascimento, &mut errors);

        if let Some(nota) = nota_media {
            if !nota.is_finite() {
                errors.insert("notaMedia".to_string(), "Must be a finite number".to_string());
            }
        }

        match (nome, idade, serie, nota_media, endereco, nome_pai, nome_mae, data_nascimento) {
            (
                Some(nome),
                Some(idade),
                Some(serie),
                Some(nota_media),
                Some(endereco),
                Some(nome_pai),
                Some(nome_mae),
                Some(data_nascimento),
            ) if errors.is_empty() => Ok(StudentData {
                nome,
                idade,
                serie,
                nota_media,
                endereco,
                nome_pai,
                nome_mae,
                data_nascimento,
            }),
            _ => Err(errors),
        }
    }
}

fn required<T>(field: &str, value: Option<T>, errors: &mut BTreeMap<String, String>) -> Option<T> {
    if value.is_none() {
        errors.insert(field.to_string(), REQUIRED.to_string());
    }
    value
}

fn required_text(
    field: &str,
    value: Option<String>,
    errors: &mut BTreeMap<String, String>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            errors.insert(field.to_string(), REQUIRED.to_string());
            None
        }
    }
}

/// Birth dates go out as `YYYY-MM-DDT00:00:00` and come in either as a plain
/// date or as any ISO date-time, whose calendar date is kept.
pub mod birth_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const OUTPUT_FORMAT: &str = "%Y-%m-%dT00:00:00";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(OUTPUT_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw))),
        }
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc().date());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.date())
    }
}
