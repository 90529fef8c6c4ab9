use vigil_types::ReportModel;

/// Render the report model as a standalone HTML document.
///
/// One section per category, skipping empty ones; all source-provided text
/// is escaped. The rendering knows nothing about how the document is
/// delivered.
pub fn render_html(report: &ReportModel) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Anomaly report</title>\n</head>\n<body>\n");
    html.push_str(&format!(
        "<h1>Anomaly report ({} entries)</h1>\n",
        report.total_anomalies()
    ));

    if report.is_empty() {
        html.push_str("<p>No anomalies found.</p>\n");
    }

    if !report.inactive_devices.is_empty() {
        section(&mut html, "Inactive devices", report.inactive_devices.len());
        html.push_str("<ul>\n");
        for device in &report.inactive_devices {
            html.push_str(&format!(
                "<li>{} (idx {}) &mdash; last update {}</li>\n",
                escape(&device.name),
                escape(&device.idx),
                device.last_update.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        html.push_str("</ul>\n");
    }

    if !report.low_battery_devices.is_empty() {
        section(&mut html, "Low battery", report.low_battery_devices.len());
        html.push_str("<ul>\n");
        for device in &report.low_battery_devices {
            html.push_str(&format!(
                "<li>{} (id {}) &mdash; {}%</li>\n",
                escape(&device.name),
                escape(&device.id),
                device.level
            ));
        }
        html.push_str("</ul>\n");
    }

    if !report.unassigned_devices.is_empty() {
        section(&mut html, "Devices without a room plan", report.unassigned_devices.len());
        html.push_str("<ul>\n");
        for device in &report.unassigned_devices {
            html.push_str(&format!(
                "<li>{} (idx {})</li>\n",
                escape(&device.name),
                escape(&device.idx)
            ));
        }
        html.push_str("</ul>\n");
    }

    if !report.failed_gateway_devices.is_empty() {
        section(&mut html, "Failed gateway devices", report.failed_gateway_devices.len());
        html.push_str("<ul>\n");
        for device in &report.failed_gateway_devices {
            let location = device.location.as_deref().unwrap_or("unknown location");
            html.push_str(&format!(
                "<li>{} (node {}) &mdash; {}</li>\n",
                escape(&device.name),
                device.id,
                escape(location)
            ));
        }
        html.push_str("</ul>\n");
    }

    if !report.failed_checks.is_empty() {
        section(&mut html, "Unresolved health checks", report.failed_checks.len());
        html.push_str("<ul>\n");
        for check in &report.failed_checks {
            html.push_str(&format!(
                "<li>{} &mdash; {}</li>\n",
                escape(&check.name),
                escape(&check.status)
            ));
        }
        html.push_str("</ul>\n");
    }

    if !report.failed_services.is_empty() {
        section(&mut html, "Failed services", report.failed_services.len());
        html.push_str("<ul>\n");
        for service in &report.failed_services {
            html.push_str(&format!(
                "<li>{} &mdash; status {}</li>\n",
                escape(&service.name),
                escape(&service.status)
            ));
        }
        html.push_str("</ul>\n");
    }

    if !report.log_errors.is_empty() {
        section(&mut html, "Recurring log errors", report.log_errors.len());
        html.push_str("<ul>\n");
        for error in &report.log_errors {
            html.push_str(&format!(
                "<li>{} &times; {}</li>\n",
                error.count,
                escape(&error.text)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn section(html: &mut String, title: &str, count: usize) {
    html.push_str(&format!("<h2>{} ({})</h2>\n", title, count));
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
