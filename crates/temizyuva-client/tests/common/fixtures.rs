//! Tokens and backend payloads

use chrono::{Duration, Utc};
use serde_json::{Value, json};

use temizyuva_client::token::unsigned_token;

pub const ADMIN_EMAIL: &str = "admin@temizyuva.com";
pub const ADMIN_PASSWORD: &str = "Temiz!2024";

/// Token whose `exp` lies `seconds` from now (negative for the past)
pub fn token_expiring_in(seconds: i64) -> String {
    unsigned_token(&json!({
        "sub": "1",
        "email": ADMIN_EMAIL,
        "exp": (Utc::now() + Duration::seconds(seconds)).timestamp(),
    }))
}

/// Token valid for an hour
pub fn live_token() -> String {
    token_expiring_in(3600)
}

/// Token that expired a minute ago
pub fn expired_token() -> String {
    token_expiring_in(-60)
}

pub fn admin_user() -> Value {
    json!({
        "id": 1,
        "firstName": "Ayşe",
        "lastName": "Yılmaz",
        "email": ADMIN_EMAIL,
        "role": "Admin"
    })
}

pub fn login_response(token: &str) -> Value {
    json!({
        "success": true,
        "message": "Giriş başarılı",
        "data": { "token": token, "user": admin_user() }
    })
}

pub fn reservation(id: i64, customer: &str, status: i64) -> Value {
    json!({
        "id": id,
        "userFullName": customer,
        "email": "musteri@example.com",
        "phone": "05551234567",
        "serviceTitle": "Ev Temizliği",
        "addressTitle": "Ev",
        "addressFullAddress": "Kadıköy, İstanbul",
        "reservationDate": "2024-06-01T00:00:00",
        "startTime": "10:00",
        "endTime": "13:00",
        "status": status,
        "paymentStatus": 0,
        "paymentMethod": 0,
        "price": 1500.0,
        "finalPrice": 1500.0,
        "paidTotal": 500.0,
        "remainingAmount": 1000.0,
        "createdAt": "2024-05-20T09:30:00"
    })
}

pub fn service(id: i64, title: &str, active: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "imageUrl": "",
        "shortDescription": format!("{title} hizmeti"),
        "price": 1200.0,
        "isActive": active
    })
}
