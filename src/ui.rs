use crate::aggregates::{busiest_day, DaySummary};
use crate::carousel::{Carousel, Slide};
use crate::filters::FilterState;
use crate::models::{ActivityEntry, ActivityKind, DayOfWeek, HourBucket, Month, StatsSummary};
use crate::session::Snapshot;
use crate::weekday::WeekdayState;
use std::fmt::Write;

/// Months the reference data covers; any other selected month is appended.
const OFFERED_MONTHS: std::ops::RangeInclusive<u8> = 5..=11;
const OVERVIEW_ACTIVITY: usize = 5;

pub fn render_index(snapshot: &Snapshot) -> String {
    let content = match snapshot.slide {
        Slide::Overview => render_overview(snapshot),
        Slide::Filters => render_filters(&snapshot.filters),
        Slide::WeekdayAnalysis => render_weekday(&snapshot.weekday, &snapshot.day_summary),
    };
    let refresh = if snapshot.filters.is_loading() || snapshot.weekday.is_loading() {
        r#"<meta http-equiv="refresh" content="1" />"#
    } else {
        ""
    };

    INDEX_HTML
        .replace("{{REFRESH}}", refresh)
        .replace("{{DOTS}}", &render_dots(&snapshot.carousel))
        .replace("{{TITLE}}", snapshot.slide.title())
        .replace("{{NOTICE}}", &render_notice(snapshot))
        .replace("{{CONTENT}}", &content)
}

fn render_dots(carousel: &Carousel) -> String {
    let mut html = String::new();
    for (index, slide) in Slide::ALL.iter().enumerate() {
        let class = if index == carousel.current() { "dot active" } else { "dot" };
        let _ = write!(
            html,
            r#"<form method="post" action="/slide/{index}"><button class="{class}" type="submit" aria-label="Go to {}"></button></form>"#,
            slide.title()
        );
    }
    html
}

fn render_notice(snapshot: &Snapshot) -> String {
    let errors = [
        snapshot.filters.stats_error(),
        snapshot.filters.activity_error(),
        snapshot.weekday.error(),
    ];
    if errors.iter().all(Option::is_none) {
        return String::new();
    }
    r#"<p class="notice">Some data could not be refreshed; showing the last values received.</p>"#
        .to_string()
}

fn render_overview(snapshot: &Snapshot) -> String {
    let filters = &snapshot.filters;
    if filters.is_loading() {
        return loading();
    }

    let busiest = match busiest_day(snapshot.weekday.series()) {
        Some((day, total)) => format!(
            r#"<div class="stat"><span class="label">Busiest day</span><span class="value">{}</span><span class="hint">{} sales</span></div>"#,
            day.name(),
            format_count(total)
        ),
        None => String::new(),
    };
    let recent = &filters.activity()[..filters.activity().len().min(OVERVIEW_ACTIVITY)];

    format!(
        r#"<section class="panel">{}{busiest}</section><section class="card"><h3>Latest activity</h3>{}</section>"#,
        render_stat_cards(filters.stats()),
        render_activity(recent)
    )
}

fn render_filters(filters: &FilterState) -> String {
    if filters.is_loading() {
        return loading();
    }

    format!(
        r#"<form class="toolbar" method="post" action="/filters/month">
  <label for="month-select">Month</label>
  <select id="month-select" name="month" onchange="this.form.submit()">{}</select>
  <noscript><button type="submit">Apply</button></noscript>
</form>
<section class="panel">{}</section>
<section class="card">
  <div class="card-header">
    <h3>Recent activity</h3>
    <form method="post" action="/filters/limit">
      <label for="limit">Items</label>
      <input id="limit" name="limit" type="number" min="1" value="{}" />
    </form>
  </div>
  {}
</section>"#,
        render_month_options(filters.selected_month()),
        render_stat_cards(filters.stats()),
        filters.limit_draft(),
        render_activity(filters.activity())
    )
}

fn render_month_options(selected: Option<Month>) -> String {
    let mut months: Vec<Month> = OFFERED_MONTHS.filter_map(Month::new).collect();
    if let Some(month) = selected.filter(|month| !months.contains(month)) {
        months.push(month);
        months.sort();
    }

    let mut html = String::new();
    let all_selected = if selected.is_none() { " selected" } else { "" };
    let _ = write!(html, r#"<option value=""{all_selected}>All months</option>"#);
    for month in months {
        let flag = if selected == Some(month) { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{}"{flag}>{}</option>"#,
            month.number(),
            month.name()
        );
    }
    html
}

fn render_stat_cards(stats: &StatsSummary) -> String {
    let cards = [
        ("Revenue", format_brl(stats.total_revenue), "revenue"),
        ("Sales", format_count(stats.total_sales), "sales"),
        ("Customers", format_count(stats.total_customers), "customers"),
    ];

    let mut html = String::new();
    for (label, value, class) in cards {
        let _ = write!(
            html,
            r#"<div class="stat {class}"><span class="label">{label}</span><span class="value">{value}</span></div>"#
        );
    }
    html
}

fn render_activity(activity: &[ActivityEntry]) -> String {
    if activity.is_empty() {
        return r#"<p class="hint">No recent activity found.</p>"#.to_string();
    }

    let mut html = String::from(r#"<ul class="activity">"#);
    for entry in activity {
        let kind = match entry.kind {
            ActivityKind::Success => "success",
            ActivityKind::Other(_) => "other",
        };
        let _ = write!(
            html,
            r#"<li><span class="marker {kind}"></span><span class="time">{}</span><span class="desc">{}</span></li>"#,
            escape_html(&entry.time),
            escape_html(&entry.description)
        );
    }
    html.push_str("</ul>");
    html
}

fn render_weekday(weekday: &WeekdayState, summary: &DaySummary) -> String {
    if weekday.is_loading() {
        return loading();
    }

    let mut picker = String::from(r#"<section class="card"><h3>Pick a weekday</h3><div class="days">"#);
    for day in DayOfWeek::all() {
        let class = if day == weekday.selected_day() { "day active" } else { "day" };
        let _ = write!(
            picker,
            r#"<form method="post" action="/weekday/{}"><button class="{class}" type="submit" title="{}">{}</button></form>"#,
            day.index(),
            day.name(),
            day.short_name()
        );
    }
    picker.push_str("</div></section>");

    let slice = weekday.current_slice();
    if slice.is_empty() {
        return format!(r#"{picker}<p class="hint">No data found for this day.</p>"#);
    }

    format!(
        r#"{picker}
<section class="panel">
  <div class="stat"><span class="label">Total sales</span><span class="value">{}</span></div>
  <div class="stat"><span class="label">Peak hour</span><span class="value">{}</span><span class="hint">{} sales</span></div>
  <div class="stat"><span class="label">Average per hour</span><span class="value">{}</span><span class="hint">sales/hour</span></div>
</section>
<section class="card"><h3>Sales by hour - {}</h3>{}</section>"#,
        format_count(summary.total),
        escape_html(&summary.peak.hour),
        format_count(summary.peak.sales),
        format_count(summary.average),
        weekday.selected_day().name(),
        render_bars(slice, summary.peak.sales)
    )
}

fn render_bars(buckets: &[HourBucket], peak: u64) -> String {
    let scale = peak.max(1) as f64;
    let mut html = String::from(r#"<div class="bars">"#);
    for bucket in buckets {
        let height = bucket.sales as f64 / scale * 100.0;
        let _ = write!(
            html,
            r#"<div class="bar" title="{} sales"><span style="height: {height:.1}%"></span><small>{}</small></div>"#,
            bucket.sales,
            escape_html(&bucket.hour)
        );
    }
    html.push_str("</div>");
    html
}

fn loading() -> String {
    r#"<p class="hint loading">Loading data...</p>"#.to_string()
}

/// Formats an amount as Brazilian reais, e.g. `R$ 1.234,50`.
pub fn format_brl(amount: f64) -> String {
    let cents = (amount.max(0.0) * 100.0).round() as u64;
    format!("R$ {},{:02}", format_count(cents / 100), cents % 100)
}

/// Groups thousands with `.`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  {{REFRESH}}
  <title>Analytics Dashboard</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #2b2a28;
      --muted: #7a746d;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 18px 44px rgba(47, 72, 88, 0.16);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #ffe9d4 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    header.top {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 18px 32px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.1);
    }

    header.top h1 { margin: 0; font-size: 1.5rem; }
    header.top p { margin: 2px 0 0; color: var(--muted); font-size: 0.9rem; }

    .dots { display: flex; gap: 8px; }
    .dots form { margin: 0; }

    .dot {
      width: 10px;
      height: 10px;
      padding: 0;
      border: none;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.25);
      cursor: pointer;
    }

    .dot.active { width: 30px; background: var(--accent); }

    main { width: min(980px, 100%); margin: 0 auto; padding: 28px 18px 48px; display: grid; gap: 22px; }

    .nav { display: flex; justify-content: space-between; align-items: center; }
    .nav h2 { margin: 0; font-size: 1.9rem; }
    .nav form { margin: 0; }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
      background: var(--card);
      box-shadow: var(--shadow);
    }

    .panel { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 16px; }

    .stat, .card {
      background: var(--card);
      border-radius: 20px;
      padding: 18px;
      box-shadow: var(--shadow);
    }

    .stat { display: grid; gap: 6px; }
    .stat .label { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.12em; color: var(--muted); }
    .stat .value { font-size: 1.7rem; font-weight: 600; color: var(--accent-2); }
    .card h3 { margin: 0 0 12px; }
    .card-header { display: flex; justify-content: space-between; align-items: center; }
    .card-header input { width: 80px; }

    .toolbar { display: flex; gap: 12px; align-items: center; }

    .activity { list-style: none; margin: 0; padding: 0; display: grid; gap: 8px; max-height: 320px; overflow-y: auto; }
    .activity li { display: flex; gap: 12px; align-items: center; }
    .activity .time { color: var(--muted); font-size: 0.9rem; }
    .marker { width: 8px; height: 8px; border-radius: 999px; background: #3b82f6; }
    .marker.success { background: #22c55e; }

    .days { display: grid; grid-template-columns: repeat(7, 1fr); gap: 8px; }
    .days form { margin: 0; }
    .day { width: 100%; }
    .day.active { background: var(--accent); color: white; }

    .bars { display: flex; align-items: flex-end; gap: 6px; height: 280px; }
    .bar { flex: 1; height: 100%; display: flex; flex-direction: column; justify-content: flex-end; align-items: center; gap: 4px; }
    .bar span { width: 100%; border-radius: 8px 8px 0 0; background: var(--accent-2); }
    .bar small { color: var(--muted); font-size: 0.7rem; }

    .hint { color: var(--muted); font-size: 0.9rem; margin: 0; }
    .loading { text-align: center; padding: 40px 0; }
    .notice { margin: 0; padding: 10px 16px; border-radius: 12px; background: #fdecea; color: #c63b2b; }

    footer { text-align: center; color: var(--muted); font-size: 0.85rem; padding: 24px; }
  </style>
</head>
<body>
  <header class="top">
    <div>
      <h1>Analytics Dashboard</h1>
      <p>Sales analysis</p>
    </div>
    <nav class="dots">{{DOTS}}</nav>
  </header>
  <main>
    <div class="nav">
      <form method="post" action="/slide/prev"><button type="submit" aria-label="Previous">&larr;</button></form>
      <h2>{{TITLE}}</h2>
      <form method="post" action="/slide/next"><button type="submit" aria-label="Next">&rarr;</button></form>
    </div>
    {{NOTICE}}
    {{CONTENT}}
  </main>
  <footer>Use the arrows or the dots to switch views</footer>
</body>
</html>
"#;
