//! Human-readable summary of an extraction, printed after each run.

use std::fmt::Write;

use crate::types::{HsdsData, Location, Schedule, Service};

const BANNER: &str =
    "================================================================================";

/// Render the console summary for an extraction result.
pub fn render_summary(data: &HsdsData) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "HSDS DATA EXTRACTION SUMMARY");
    let _ = writeln!(out, "{BANNER}");

    let org = &data.organization;
    let _ = writeln!(out, "\nORGANIZATION");
    let _ = writeln!(out, "   Name: {}", org.name);
    let _ = writeln!(out, "   Description: {}", org.description);
    if let Some(url) = &org.url {
        let _ = writeln!(out, "   Website: {url}");
    }
    if let Some(email) = &org.email {
        let _ = writeln!(out, "   Email: {email}");
    }

    let _ = writeln!(
        out,
        "\nSERVICES & LOCATIONS ({} found)",
        data.services_at_locations.len()
    );

    for (idx, sal) in data.services_at_locations.iter().enumerate() {
        render_service(&mut out, idx + 1, &sal.service);
        render_location(&mut out, &sal.location);
        if let Some(description) = &sal.description {
            let _ = writeln!(out, "          Note: {description}");
        }
    }

    let _ = writeln!(out, "\n{BANNER}");
    out
}

fn render_service(out: &mut String, idx: usize, service: &Service) {
    let _ = writeln!(out, "\n   [{idx}] SERVICE: {}", service.name);
    let _ = writeln!(out, "       Description: {}", service.description);
    let _ = writeln!(out, "       Status: {}", service.status);

    if let Some(eligibility) = &service.eligibility {
        let _ = writeln!(out, "       Eligibility: {eligibility}");
    }
    if let Some(fees) = &service.fees {
        let _ = writeln!(out, "       Fees: {fees}");
    }
    if let Some(application) = &service.application_process {
        let _ = writeln!(out, "       How to apply: {application}");
    }
    if let Some(access) = &service.access_requirements {
        let _ = writeln!(out, "       Access requirements: {access}");
    }
    if let Some(area) = &service.service_area {
        let _ = writeln!(out, "       Service area: {area}");
    }
    if let Some(interpretation) = &service.interpretation_services {
        let _ = writeln!(out, "       Interpretation: {interpretation}");
    }
    if !service.auxiliary_resources.is_empty() {
        let _ = writeln!(
            out,
            "       Also offers: {}",
            service.auxiliary_resources.join(", ")
        );
    }

    if !service.schedules.is_empty() {
        let _ = writeln!(out, "       Schedules:");
        for schedule in &service.schedules {
            render_schedule(out, schedule);
        }
    }

    if !service.phones.is_empty() {
        let _ = writeln!(out, "       Phone Numbers:");
        for phone in &service.phones {
            match &phone.phone_type {
                Some(kind) => {
                    let _ = writeln!(out, "         - {} ({kind})", phone.number);
                }
                None => {
                    let _ = writeln!(out, "         - {}", phone.number);
                }
            }
        }
    }
}

fn render_schedule(out: &mut String, schedule: &Schedule) {
    let _ = writeln!(
        out,
        "         - {}",
        schedule.description.as_deref().unwrap_or("Schedule")
    );
    if let Some(freq) = &schedule.freq {
        let _ = writeln!(out, "           Frequency: {freq}");
    }
    if let Some(byday) = &schedule.byday {
        let _ = writeln!(out, "           Days: {byday}");
    }
    if schedule.opens_at.is_some() || schedule.closes_at.is_some() {
        let _ = writeln!(
            out,
            "           Hours: {} - {}",
            schedule.opens_at.as_deref().unwrap_or("?"),
            schedule.closes_at.as_deref().unwrap_or("?")
        );
    }
    if schedule.year_round == Some(true) {
        let _ = writeln!(out, "           Year-round");
    }
}

fn render_location(out: &mut String, location: &Location) {
    let _ = writeln!(out, "\n       LOCATION: {}", location.name);
    if let Some(description) = &location.description {
        let _ = writeln!(out, "          Description: {description}");
    }
    if let Some(cross_street) = &location.cross_street {
        let _ = writeln!(out, "          Cross street: {cross_street}");
    }
    if let (Some(lat), Some(lon)) = (location.latitude, location.longitude) {
        let _ = writeln!(out, "          Coordinates: {lat}, {lon}");
    }
    for addr in &location.addresses {
        let _ = writeln!(out, "          Address: {}", addr.address_1);
        if let Some(line2) = &addr.address_2 {
            let _ = writeln!(out, "                   {line2}");
        }
        let _ = writeln!(
            out,
            "                   {}, {} {}",
            addr.city, addr.state_province, addr.postal_code
        );
        let _ = writeln!(out, "                   Type: {}", addr.address_type);
    }
}
