use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_SHOP_NAME_LEN: usize = 150;
pub const MAX_ADDRESS_LEN: usize = 200;
pub const MAX_PASSWORD_LEN: usize = 200;
pub const MAX_PIC_LEN: usize = 200;
pub const MAX_SERVICE_NAME_LEN: usize = 100;
pub const MAX_LOCATION_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BarberStatus {
    Pending,
    Approved,
    Rejected,
}

impl BarberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for BarberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarberStatus {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(StoreError::Validation(format!(
                "unknown barber status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            other => Err(StoreError::Validation(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

pub fn parse_slot_date(value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| StoreError::Validation(format!("invalid booking date: {value}")))
}

pub fn parse_slot_time(value: &str) -> Result<NaiveTime, StoreError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| StoreError::Validation(format!("invalid booking time: {value}")))
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Barber {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub shop_name: String,
    pub address: String,
    pub password: String,
    pub profile_pic: Option<String>,
    pub shop_front_pic: Option<String>,
    pub status: BarberStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBarber {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub shop_name: String,
    pub address: String,
    pub password: String,
    pub profile_pic: Option<String>,
    pub shop_front_pic: Option<String>,
    pub status: Option<BarberStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BarberPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub shop_name: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
    pub profile_pic: Option<String>,
    pub shop_front_pic: Option<String>,
    pub status: Option<BarberStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct BarberFilter {
    pub status: Option<BarberStatus>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub shop_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Service {
    pub id: i64,
    pub barber_id: i64,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewService {
    pub barber_id: i64,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicePatch {
    pub barber_id: Option<i64>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub barber_id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub barber_id: i64,
    pub customer_id: i64,
    pub service_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub barber_id: i64,
    pub customer_id: i64,
    pub service_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub status: Option<BookingStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPatch {
    pub barber_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub service_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub location: Option<String>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub barber_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub status: Option<BookingStatus>,
    pub date: Option<NaiveDate>,
    pub service_name: Option<String>,
}

fn required(field: &'static str, value: &str, max: usize) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{field} is required")));
    }
    bounded(field, value, max)
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<(), StoreError> {
    if value.chars().count() > max {
        return Err(StoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

impl NewBarber {
    pub fn validate(&self) -> Result<(), StoreError> {
        required("name", &self.name, MAX_NAME_LEN)?;
        required("phone", &self.phone, MAX_PHONE_LEN)?;
        required("email", &self.email, MAX_EMAIL_LEN)?;
        required("shop_name", &self.shop_name, MAX_SHOP_NAME_LEN)?;
        required("address", &self.address, MAX_ADDRESS_LEN)?;
        required("password", &self.password, MAX_PASSWORD_LEN)?;
        if let Some(pic) = &self.profile_pic {
            bounded("profile_pic", pic, MAX_PIC_LEN)?;
        }
        if let Some(pic) = &self.shop_front_pic {
            bounded("shop_front_pic", pic, MAX_PIC_LEN)?;
        }
        Ok(())
    }
}

impl BarberPatch {
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(name) = &self.name {
            required("name", name, MAX_NAME_LEN)?;
        }
        if let Some(phone) = &self.phone {
            required("phone", phone, MAX_PHONE_LEN)?;
        }
        if let Some(email) = &self.email {
            required("email", email, MAX_EMAIL_LEN)?;
        }
        if let Some(shop_name) = &self.shop_name {
            required("shop_name", shop_name, MAX_SHOP_NAME_LEN)?;
        }
        if let Some(address) = &self.address {
            required("address", address, MAX_ADDRESS_LEN)?;
        }
        if let Some(password) = &self.password {
            required("password", password, MAX_PASSWORD_LEN)?;
        }
        if let Some(pic) = &self.profile_pic {
            bounded("profile_pic", pic, MAX_PIC_LEN)?;
        }
        if let Some(pic) = &self.shop_front_pic {
            bounded("shop_front_pic", pic, MAX_PIC_LEN)?;
        }
        Ok(())
    }
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), StoreError> {
        required("name", &self.name, MAX_NAME_LEN)?;
        required("phone", &self.phone, MAX_PHONE_LEN)?;
        required("email", &self.email, MAX_EMAIL_LEN)?;
        required("password", &self.password, MAX_PASSWORD_LEN)?;
        Ok(())
    }
}

impl CustomerPatch {
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(name) = &self.name {
            required("name", name, MAX_NAME_LEN)?;
        }
        if let Some(phone) = &self.phone {
            required("phone", phone, MAX_PHONE_LEN)?;
        }
        if let Some(email) = &self.email {
            required("email", email, MAX_EMAIL_LEN)?;
        }
        if let Some(password) = &self.password {
            required("password", password, MAX_PASSWORD_LEN)?;
        }
        Ok(())
    }
}

impl NewService {
    pub fn validate(&self) -> Result<(), StoreError> {
        required("name", &self.name, MAX_SERVICE_NAME_LEN)
    }
}

impl ServicePatch {
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(name) = &self.name {
            required("name", name, MAX_SERVICE_NAME_LEN)?;
        }
        Ok(())
    }
}

impl NewBooking {
    pub fn validate(&self) -> Result<(), StoreError> {
        required("service_name", &self.service_name, MAX_SERVICE_NAME_LEN)?;
        required("location", &self.location, MAX_LOCATION_LEN)?;
        Ok(())
    }
}

impl BookingPatch {
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(service_name) = &self.service_name {
            required("service_name", service_name, MAX_SERVICE_NAME_LEN)?;
        }
        if let Some(location) = &self.location {
            required("location", location, MAX_LOCATION_LEN)?;
        }
        Ok(())
    }
}
