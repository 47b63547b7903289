// Random User API documentation: https://randomuser.me/documentation
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Server-reported pagination metadata
///
/// Kept separate from the client-side page counter: the server is the source
/// of truth for display, the client counter drives the next request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseInfo {
    pub page: u32,
    pub results: u32,
}

/// One page of users as returned by the listing endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UsersListResponse {
    pub results: Vec<UserDto>,
    #[serde(default)]
    pub info: ResponseInfo,
}

/// A user record from the listing API
///
/// Passthrough type: the client only ever interprets `results` and `info` of
/// the surrounding response. Every field defaults so that `inc`-filtered
/// responses still decode.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UserDto {
    pub gender: Gender,
    pub name: NameDto,
    pub location: LocationDto,
    pub email: CompactString,
    pub login: LoginDto,
    pub dob: DatedDto,
    pub registered: DatedDto,
    pub phone: CompactString,
    pub cell: CompactString,
    pub id: IdDto,
    pub picture: PictureDto,
    pub nat: CompactString,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NameDto {
    pub title: CompactString,
    pub first: CompactString,
    pub last: CompactString,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LocationDto {
    pub street: StreetDto,
    pub city: CompactString,
    pub state: CompactString,
    pub country: CompactString,
    pub postcode: CompactString,
    pub coordinates: CoordinatesDto,
    pub timezone: TimezoneDto,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StreetDto {
    pub number: u32,
    pub name: CompactString,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CoordinatesDto {
    pub latitude: CompactString,
    pub longitude: CompactString,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TimezoneDto {
    pub offset: CompactString,
    pub description: CompactString,
}

/// Credential hash set attached to each user
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginDto {
    pub uuid: CompactString,
    pub username: CompactString,
    pub password: CompactString,
    pub salt: CompactString,
    pub md5: CompactString,
    pub sha1: CompactString,
    pub sha256: CompactString,
}

/// A dated event (birth, registration) with the server-computed age
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DatedDto {
    pub date: Option<DateTime<Utc>>,
    pub age: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IdDto {
    pub name: CompactString,
    pub value: Option<CompactString>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PictureDto {
    pub large: CompactString,
    pub medium: CompactString,
    pub thumbnail: CompactString,
}
