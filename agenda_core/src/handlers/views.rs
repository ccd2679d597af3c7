//! Server-rendered HTML for the three booking screens

use crate::models::{Appointment, Screen};
use std::fmt::Write;

pub enum Notice {
    Success(String),
    Error(String),
}

pub struct CreateView<'a> {
    pub date: &'a str,
    pub hours: &'a [String],
}

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn page(app_name: &str, active: Screen, notice: Option<&Notice>, body: &str) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<h1>{}</h1>\n<nav>",
        escape(app_name),
        escape(app_name)
    );

    for (screen, key, label) in [
        (Screen::Create, "create", "Book appointment"),
        (Screen::List, "list", "View appointments"),
        (Screen::Cancel, "cancel", "Cancel appointment"),
    ] {
        if screen == active {
            let _ = write!(html, " <strong>{}</strong>", label);
        } else {
            let _ = write!(html, " <a href=\"/?screen={}\">{}</a>", key, label);
        }
    }
    html.push_str("</nav>\n");

    match notice {
        Some(Notice::Success(msg)) => {
            let _ = writeln!(html, "<p class=\"success\">{}</p>", escape(msg));
        }
        Some(Notice::Error(msg)) => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape(msg));
        }
        None => {}
    }

    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

pub fn create_screen(view: &CreateView<'_>) -> String {
    let mut html = String::new();
    let date = escape(view.date);

    let _ = writeln!(
        html,
        "<form method=\"get\" action=\"/\">\n<input type=\"hidden\" name=\"screen\" value=\"create\">\n<label>Date <input type=\"date\" name=\"date\" value=\"{}\"></label>\n<button type=\"submit\">Check availability</button>\n</form>",
        date
    );

    if view.hours.is_empty() {
        html.push_str("<p>No hours available for this date.</p>\n");
        return html;
    }

    let _ = write!(
        html,
        "<form method=\"post\" action=\"/appointments\">\n<input type=\"hidden\" name=\"date\" value=\"{}\">\n<label>Full name <input type=\"text\" name=\"name\"></label>\n<label>Email <input type=\"email\" name=\"email\"></label>\n<label>Time <select name=\"time\">",
        date
    );
    for hour in view.hours {
        let hour = escape(hour);
        let _ = write!(html, "<option value=\"{}\">{}</option>", hour, hour);
    }
    html.push_str(
        "</select></label>\n<label>Reason <textarea name=\"reason\"></textarea></label>\n<button type=\"submit\">Book</button>\n</form>\n",
    );

    html
}

pub fn list_screen(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return "<p>No appointments booked yet.</p>\n".to_string();
    }

    let mut html = String::from(
        "<table>\n<tr><th>ID</th><th>Name</th><th>Email</th><th>Date and time</th><th>Reason</th></tr>\n",
    );
    for appointment in appointments {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            appointment.id,
            escape(&appointment.name),
            escape(&appointment.email),
            escape(&appointment.datetime),
            escape(&appointment.reason)
        );
    }
    html.push_str("</table>\n");
    html
}

pub fn cancel_screen(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return "<p>There are no appointments to cancel.</p>\n".to_string();
    }

    let mut html = String::from(
        "<form method=\"post\" action=\"/appointments/cancel\">\n<label>Appointment <select name=\"index\">",
    );
    for (index, appointment) in appointments.iter().enumerate() {
        let _ = write!(
            html,
            "<option value=\"{}\">{} - {} - {}</option>",
            index,
            appointment.id,
            escape(&appointment.name),
            escape(&appointment.datetime)
        );
    }
    html.push_str("</select></label>\n<button type=\"submit\">Cancel appointment</button>\n</form>\n");
    html
}
