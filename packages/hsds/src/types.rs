//! HSDS (Human Services Data Specification) record types.
//!
//! This is an externally defined schema consumed by the extractor, not
//! designed here. Every field is optional or defaultable: extraction from
//! unconstrained flyer images is inherently uncertain, so deserialization
//! must never fail on an absent field.
//!
//! Doc comments on fields double as schema descriptions — schemars carries
//! them into the JSON schema the model sees.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Root of an extraction: one organization plus its service/location pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HsdsData {
    /// The organization publishing the flyer
    #[serde(default)]
    pub organization: Organization,

    /// Each service offered, paired with the location offering it
    #[serde(default)]
    pub services_at_locations: Vec<ServiceAtLocation>,
}

/// The organization responsible for the services on the flyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Organization {
    /// Organization name as printed on the flyer
    #[serde(default)]
    pub name: String,

    /// Short description of what the organization does
    #[serde(default)]
    pub description: String,

    /// Website URL, if shown
    #[serde(default)]
    pub url: Option<String>,

    /// Contact email, if shown
    #[serde(default)]
    pub email: Option<String>,
}

/// A join record pairing one service with one location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceAtLocation {
    #[serde(default)]
    pub service: Service,

    #[serde(default)]
    pub location: Location,

    /// Details specific to this service at this location
    #[serde(default)]
    pub description: Option<String>,
}

/// A service offered by the organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Service {
    /// Service name
    #[serde(default)]
    pub name: String,

    /// What the service provides
    #[serde(default)]
    pub description: String,

    /// Operational status
    #[serde(default)]
    pub status: ServiceStatus,

    /// Service-specific URL, if shown
    #[serde(default)]
    pub url: Option<String>,

    /// Service-specific email, if shown
    #[serde(default)]
    pub email: Option<String>,

    /// Who may use the service (e.g., "adults 55+", "veterans")
    #[serde(default)]
    pub eligibility: Option<String>,

    /// Cost to the user (e.g., "free", "sliding scale")
    #[serde(default)]
    pub fees: Option<String>,

    /// How to apply or sign up
    #[serde(default)]
    pub application_process: Option<String>,

    /// Documents or conditions required for access (e.g., "photo ID")
    #[serde(default)]
    pub access_requirements: Option<String>,

    /// Geographic area served (e.g., "Hennepin County residents")
    #[serde(default)]
    pub service_area: Option<String>,

    /// Language/interpretation support available
    #[serde(default)]
    pub interpretation_services: Option<String>,

    /// Extra resources mentioned alongside the service
    /// (e.g., "free parking", "childcare available")
    #[serde(default)]
    pub auxiliary_resources: Vec<String>,

    /// When the service operates
    #[serde(default)]
    pub schedules: Vec<Schedule>,

    /// Phone numbers for the service
    #[serde(default)]
    pub phones: Vec<Phone>,
}

/// Operational status of a service.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    Active,
    Inactive,
    Defunct,
    TemporarilyClosed,
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ServiceStatus::Active => "active",
            ServiceStatus::Inactive => "inactive",
            ServiceStatus::Defunct => "defunct",
            ServiceStatus::TemporarilyClosed => "temporarily closed",
        };
        f.write_str(label)
    }
}

/// A phone number attached to a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Phone {
    /// The number as printed (any format)
    #[serde(default)]
    pub number: String,

    /// Kind of line (e.g., "voice", "fax", "hotline")
    #[serde(default)]
    pub phone_type: Option<String>,

    /// Extension, if any
    #[serde(default)]
    pub extension: Option<String>,
}

/// When a service operates, in simplified iCal RRULE terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Schedule {
    /// Free-text label (e.g., "Food shelf hours")
    #[serde(default)]
    pub description: Option<String>,

    /// Recurrence frequency
    #[serde(default)]
    pub freq: Option<ScheduleFreq>,

    /// Days of week, comma separated iCal codes (e.g., "MO,WE,FR")
    #[serde(default)]
    pub byday: Option<String>,

    /// Opening time, 24h "HH:MM"
    #[serde(default)]
    pub opens_at: Option<String>,

    /// Closing time, 24h "HH:MM"
    #[serde(default)]
    pub closes_at: Option<String>,

    /// True when the schedule runs year-round rather than seasonally
    #[serde(default)]
    pub year_round: Option<bool>,
}

/// Recurrence frequency, matching iCal RRULE FREQ values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScheduleFreq {
    Weekly,
    Monthly,
}

impl std::fmt::Display for ScheduleFreq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ScheduleFreq::Weekly => "WEEKLY",
            ScheduleFreq::Monthly => "MONTHLY",
        };
        f.write_str(label)
    }
}

/// A place where services are offered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    /// Location name (e.g., "Northside Community Center")
    #[serde(default)]
    pub name: String,

    /// Free-text description of the place
    #[serde(default)]
    pub description: Option<String>,

    /// Postal addresses for the location
    #[serde(default)]
    pub addresses: Vec<Address>,

    /// Latitude, if the flyer gives coordinates
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude, if the flyer gives coordinates
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Nearest cross street, as printed (e.g., "corner of 5th & Main")
    #[serde(default)]
    pub cross_street: Option<String>,
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Address {
    /// First address line
    #[serde(default)]
    pub address_1: String,

    /// Second address line (suite, unit)
    #[serde(default)]
    pub address_2: Option<String>,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state_province: String,

    #[serde(default)]
    pub postal_code: String,

    #[serde(default)]
    pub country: Option<String>,

    /// Whether this is a physical, postal, or virtual address
    #[serde(default)]
    pub address_type: AddressType,
}

/// Kind of address.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    #[default]
    Physical,
    Postal,
    Virtual,
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AddressType::Physical => "physical",
            AddressType::Postal => "postal",
            AddressType::Virtual => "virtual",
        };
        f.write_str(label)
    }
}
