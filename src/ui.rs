use crate::catalog::{categories, Category, CategoryFilter};
use crate::models::{Configuration, Entry, ReportRow};
use crate::report::Granularity;
use chrono::NaiveDate;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    fn render(&self) -> String {
        let class = match self.kind {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        };
        format!(r#"<p class="notice {class}">{}</p>"#, escape(&self.text))
    }
}

const PAGES: [(&str, &str); 5] = [
    ("Dashboard", "/"),
    ("Log Entry", "/log"),
    ("View Entries", "/entries"),
    ("Reports", "/reports"),
    ("Settings", "/settings"),
];

const SERIES_COLORS: [&str; 7] = [
    "#ff6b4a", "#2f4858", "#33658a", "#86bbd8", "#f6ae2d", "#758e4f", "#9b5de5",
];

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, notices: &[Notice], body: &str) -> String {
    let mut nav = String::new();
    for (label, href) in PAGES {
        let class = if label == title { " class=\"active\"" } else { "" };
        let _ = write!(nav, r#"<a href="{href}"{class}>{label}</a>"#);
    }
    let notices: String = notices.iter().map(Notice::render).collect();

    LAYOUT_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{NAV}}", &nav)
        .replace("{{NOTICES}}", &notices)
        .replace("{{BODY}}", body)
}

fn entries_table(entries: &[Entry]) -> String {
    let mut html = String::from(
        "<table><thead><tr><th>Date</th><th>Category</th><th>Metric</th><th>Reflection</th><th>Bible Verse</th></tr></thead><tbody>",
    );
    for entry in entries {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.date,
            escape(entry.category.name()),
            entry.metric,
            escape(&entry.reflection),
            escape(&entry.bible_verse),
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn filter_select(selected: CategoryFilter) -> String {
    let mut html = String::from(r#"<label>Filter by Category <select name="category">"#);
    html.push_str(&option("All", selected == CategoryFilter::All));
    for category in categories() {
        html.push_str(&option(category.name(), selected == CategoryFilter::Only(*category)));
    }
    html.push_str("</select></label>");
    html
}

fn option(value: &str, selected: bool) -> String {
    let value = escape(value);
    let attr = if selected { " selected" } else { "" };
    format!(r#"<option value="{value}"{attr}>{value}</option>"#)
}

/// Entries newest first, or an empty-state notice.
pub fn render_dashboard(sorted: &[Entry], mut notices: Vec<Notice>) -> String {
    let body = if sorted.is_empty() {
        notices.push(Notice::info("No entries have been logged yet."));
        String::new()
    } else {
        format!("<p>Overview of your logged entries:</p>{}", entries_table(sorted))
    };
    layout("Dashboard", &notices, &body)
}

pub fn render_log_form(
    selected: Category,
    config: &Configuration,
    today: NaiveDate,
    notices: &[Notice],
) -> String {
    let goal = config.goal(selected).unwrap_or("No goal defined.");

    let mut picker = String::from(r#"<form method="get" action="/log" class="inline"><label>Select a Category <select name="category" onchange="this.form.submit()">"#);
    for category in categories() {
        picker.push_str(&option(category.name(), *category == selected));
    }
    picker.push_str(r#"</select></label><noscript><button type="submit">Choose</button></noscript></form>"#);

    let body = format!(
        r#"{picker}
<p><strong>Goal/Reflection:</strong> {goal}</p>
<p><strong>Bible Verse:</strong> {verse}</p>
<p>Please fill out the form below:</p>
<form method="post" action="/log" class="entry-form">
  <input type="hidden" name="category" value="{category}" />
  <label>Date <input type="date" name="date" value="{today}" required /></label>
  <label>Metric Value (e.g., number of acts, hours, etc.) <input type="number" name="metric" min="0" step="1" value="0" required /></label>
  <label>Reflection/Notes <textarea name="reflection" rows="4"></textarea></label>
  <button type="submit">Submit Entry</button>
</form>"#,
        goal = escape(goal),
        verse = escape(selected.verse()),
        category = escape(selected.name()),
    );
    layout("Log Entry", notices, &body)
}

pub fn render_entries(
    filtered: &[Entry],
    filter: CategoryFilter,
    has_any: bool,
    mut notices: Vec<Notice>,
) -> String {
    if !has_any {
        notices.push(Notice::info("No entries logged yet."));
        return layout("View Entries", &notices, "");
    }

    let mut body = format!(
        r#"<form method="get" action="/entries" class="inline">{}<button type="submit">Apply</button></form>"#,
        filter_select(filter)
    );
    if filtered.is_empty() {
        notices.push(Notice::info("No entries found for the selected category."));
    } else {
        body.push_str(&entries_table(filtered));
    }
    layout("View Entries", &notices, &body)
}

pub fn render_reports(
    rows: &[ReportRow],
    granularity: Granularity,
    filter: CategoryFilter,
    has_any: bool,
    mut notices: Vec<Notice>,
) -> String {
    if !has_any {
        notices.push(Notice::info(
            "No entries logged yet. Please log some entries to see visualizations.",
        ));
        return layout("Reports", &notices, "");
    }

    let mut controls = String::from(
        r#"<form method="get" action="/reports" class="inline"><label>Select Time Aggregation <select name="granularity">"#,
    );
    for candidate in Granularity::ALL {
        controls.push_str(&option(candidate.name(), candidate == granularity));
    }
    controls.push_str("</select></label>");
    controls.push_str(&filter_select(filter));
    controls.push_str(r#"<button type="submit">Apply</button></form>"#);

    let mut body = format!("<p>Visualize your spiritual journey over time.</p>{controls}");
    if rows.is_empty() {
        notices.push(Notice::info("No data available for the selected filters."));
        return layout("Reports", &notices, &body);
    }

    let title = match filter {
        CategoryFilter::All => format!("Metrics by {} Period and Category", granularity.name()),
        CategoryFilter::Only(_) => format!("Metrics by {} Period", granularity.name()),
    };
    let _ = write!(body, "<h2>{}</h2>{}", escape(&title), render_chart(rows));

    body.push_str("<table><thead><tr><th>Period</th>");
    if filter == CategoryFilter::All {
        body.push_str("<th>Category</th>");
    }
    body.push_str("<th>Total Metric</th></tr></thead><tbody>");
    for row in rows {
        body.push_str("<tr>");
        let _ = write!(body, "<td>{}</td>", escape(&row.period));
        if let Some(category) = row.category {
            let _ = write!(body, "<td>{}</td>", escape(category.name()));
        }
        let _ = write!(body, "<td>{}</td></tr>", row.metric);
    }
    body.push_str("</tbody></table>");

    layout("Reports", &notices, &body)
}

/// Line chart with one series per category, periods on the x axis in row order.
pub fn render_chart(rows: &[ReportRow]) -> String {
    const WIDTH: f64 = 640.0;
    const HEIGHT: f64 = 260.0;
    const PAD: f64 = 36.0;

    let mut periods: Vec<&str> = Vec::new();
    for row in rows {
        if !periods.contains(&row.period.as_str()) {
            periods.push(row.period.as_str());
        }
    }
    let mut series: Vec<Option<Category>> = Vec::new();
    for row in rows {
        if !series.contains(&row.category) {
            series.push(row.category);
        }
    }
    series.sort();

    let max = rows.iter().map(|row| row.metric).max().unwrap_or(0).max(1) as f64;
    let step = if periods.len() > 1 {
        (WIDTH - 2.0 * PAD) / (periods.len() - 1) as f64
    } else {
        0.0
    };
    let x_for = |period: &str| {
        let index = periods.iter().position(|p| *p == period).unwrap_or(0);
        if periods.len() > 1 {
            PAD + step * index as f64
        } else {
            WIDTH / 2.0
        }
    };
    let y_for = |metric: u64| HEIGHT - PAD - (metric as f64 / max) * (HEIGHT - 2.0 * PAD);

    let mut svg = format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img"><line class="chart-axis" x1="{PAD}" y1="{base}" x2="{right}" y2="{base}" /><text class="chart-label" x="4" y="{top}">{max}</text>"#,
        base = HEIGHT - PAD,
        right = WIDTH - PAD,
        top = PAD,
        max = max as u64,
    );
    for period in &periods {
        let _ = write!(
            svg,
            r#"<text class="chart-label" x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x_for(*period),
            HEIGHT - PAD / 3.0,
            escape(period)
        );
    }

    for (index, category) in series.iter().enumerate() {
        let color = category
            .and_then(|c| categories().iter().position(|known| *known == c))
            .map(|position| SERIES_COLORS[position])
            .unwrap_or(SERIES_COLORS[index % SERIES_COLORS.len()]);
        let points: Vec<(f64, f64, u64)> = rows
            .iter()
            .filter(|row| row.category == *category)
            .map(|row| (x_for(row.period.as_str()), y_for(row.metric), row.metric))
            .collect();
        let path: Vec<String> = points.iter().map(|(x, y, _)| format!("{x:.1},{y:.1}")).collect();
        let label = category.map(|c| c.name()).unwrap_or("Total Metric");
        let _ = write!(
            svg,
            r#"<g><title>{}</title><polyline class="chart-line" stroke="{color}" points="{}" />"#,
            escape(label),
            path.join(" ")
        );
        for (x, y, metric) in points {
            let _ = write!(
                svg,
                r#"<circle class="chart-point" stroke="{color}" cx="{x:.1}" cy="{y:.1}" r="4"><title>{metric}</title></circle>"#
            );
        }
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

pub fn render_settings(config: &Configuration, mut notices: Vec<Notice>) -> String {
    let mut body = String::from("<h2>Goals for Each Category</h2><ul>");
    for category in categories() {
        let _ = write!(
            body,
            "<li><strong>{}:</strong> {}</li>",
            escape(category.name()),
            escape(config.goal(*category).unwrap_or("No goal defined."))
        );
    }
    body.push_str("</ul><h2>Notification Settings</h2>");
    let settings = &config.notification_settings;
    let _ = write!(
        body,
        "<p><strong>Daily Reminder Time:</strong> {}</p><p><strong>Enable Notifications:</strong> {}</p>",
        escape(&settings.daily_reminder_time),
        settings.enable_notifications
    );
    notices.push(Notice::info("Settings are currently read-only in this version."));
    layout("Settings", &notices, &body)
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} · Christian Personal Data Tracker</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      grid-template-columns: 240px 1fr;
    }

    nav {
      padding: 28px 18px;
      background: var(--accent-2);
      display: flex;
      flex-direction: column;
      gap: 8px;
    }

    nav h1 {
      color: white;
      font-family: "Georgia", serif;
      font-size: 1.2rem;
      margin: 0 0 16px;
    }

    nav a {
      color: rgba(255, 255, 255, 0.8);
      text-decoration: none;
      padding: 8px 12px;
      border-radius: 999px;
    }

    nav a.active {
      background: white;
      color: var(--accent-2);
      font-weight: 600;
    }

    main {
      margin: 32px;
      padding: 32px;
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 18px;
      align-content: start;
    }

    main h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .notice {
      margin: 0;
      padding: 12px 16px;
      border-radius: 14px;
    }

    .notice.info { background: #e6f0f7; }
    .notice.success { background: #e3f4e8; color: #2d7a4b; }
    .notice.warning { background: #fff4d6; color: #8a5a00; }
    .notice.error { background: #fde4e0; color: #c63b2b; }

    form.inline {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: end;
    }

    form.entry-form {
      display: grid;
      gap: 12px;
      max-width: 520px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.9rem;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      background: var(--accent);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    table {
      border-collapse: collapse;
      width: 100%;
      background: white;
    }

    th, td {
      text-align: left;
      padding: 8px 10px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.1);
    }

    .chart {
      width: 100%;
      background: white;
      border-radius: 20px;
    }

    .chart-line {
      fill: none;
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke-width: 2;
    }

    .chart-axis {
      stroke: rgba(47, 72, 88, 0.25);
      stroke-dasharray: 4 6;
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }
  </style>
</head>
<body>
  <nav>
    <h1>Christian Personal Data Tracker</h1>
    {{NAV}}
  </nav>
  <main>
    <h1>{{TITLE}}</h1>
    {{NOTICES}}
    {{BODY}}
  </main>
</body>
</html>
"#;
