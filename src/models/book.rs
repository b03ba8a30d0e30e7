//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

/// Book classification used for catalog statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookType {
    Computer,
    Science,
    Social,
    Language,
    Etc,
}

impl BookType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Computer => "COMPUTER",
            BookType::Science => "SCIENCE",
            BookType::Social => "SOCIAL",
            BookType::Language => "LANGUAGE",
            BookType::Etc => "ETC",
        }
    }
}

impl std::fmt::Display for BookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "COMPUTER" => Ok(BookType::Computer),
            "SCIENCE" => Ok(BookType::Science),
            "SOCIAL" => Ok(BookType::Social),
            "LANGUAGE" => Ok(BookType::Language),
            "ETC" => Ok(BookType::Etc),
            _ => Err(format!("Invalid book type: {}", s)),
        }
    }
}

// SQLx conversion for BookType (stored as TEXT)
impl sqlx::Type<Postgres> for BookType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub book_type: BookType,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[serde(rename = "type")]
    pub book_type: BookType,
}

/// Number of catalog books sharing one type
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookStat {
    #[serde(rename = "type")]
    pub book_type: BookType,
    pub count: i64,
}
