use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_custom: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_custom: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Inquiry,
    Booked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub project_name: String,
    pub service_type_id: String,
    pub lead_source_id: String,
    pub date_inquired: Option<NaiveDate>,
    pub date_booked: Option<NaiveDate>,
    pub project_date: Option<NaiveDate>,
    /// Revenue in integer cents, never a float. Aggregation must not drift.
    pub booked_revenue_cents: i64,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub owner: String,
}

/// One month of the sales funnel. Only months with at least one inquiry
/// exist; the YTD columns restart at each calendar year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelMonth {
    pub year: i32,
    pub month: u32,
    pub inquiries: u32,
    pub closes: u32,
    pub booked_cents: i64,
    pub inquiries_ytd: u32,
    pub booked_ytd_cents: i64,
}

// ---------------------------------------------------------------------------
// Report kinds — which exports create bookings vs. only feed the funnel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Sales-funnel export: rows feed the monthly funnel and grow the
    /// lead-source catalog, but are never persisted as bookings.
    FunnelOnly,
    /// Booking-list export: each usable row becomes a booking record.
    Bookings,
}

impl ReportKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::FunnelOnly => "funnel",
            Self::Bookings => "bookings",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FunnelOnly => "Sales Funnel Report",
            Self::Bookings => "Booking List Report",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "funnel" => Some(Self::FunnelOnly),
            "bookings" => Some(Self::Bookings),
            _ => None,
        }
    }
}
