use loanmap_data::DashboardView;

/// Client-side half of the dashboard: fetch one `/api/dashboard` payload and
/// swap the choropleth layer and both summary cards from it together.
/// `DEFAULT_YEAR` is injected by `render_dashboard`.
const DASHBOARD_JS: &str = r#"
const map = L.map('map');
map.setView([0, 0], 5);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; OpenStreetMap contributors',
    maxZoom: 18,
}).addTo(map);

const YLORRD = ['#ffffcc','#ffeda0','#fed976','#feb24c','#fd8d3c','#fc4e2a','#e31a1c','#bd0026','#800026'];
let layer = null;

function colorFor(amount, max) {
    if (max <= 0) return YLORRD[0];
    const i = Math.min(YLORRD.length - 1, Math.floor((amount / max) * (YLORRD.length - 1)));
    return YLORRD[i];
}

function formatCount(n) {
    return Math.round(n).toLocaleString('en-US');
}

function render(data) {
    document.getElementById('map-title').textContent =
        `Total loan amount for the year ${data.year}`;
    document.getElementById('amount-year').textContent = formatCount(data.summary.year_total);
    document.getElementById('amount-overall').textContent =
        'Overall: ' + formatCount(data.summary.overall_total);
    document.getElementById('volume-year').textContent = formatCount(data.summary.year_volume);
    document.getElementById('volume-overall').textContent =
        'Overall: ' + formatCount(data.summary.overall_volume);

    if (layer) map.removeLayer(layer);
    const max = Math.max(0, ...data.map.features.map(f => f.properties.amount));
    layer = L.geoJSON(data.map, {
        style: f => ({
            fillColor: colorFor(f.properties.amount, max),
            fillOpacity: 0.8,
            color: '#652c0e',
            weight: 1,
        }),
        onEachFeature: (f, l) => l.bindPopup(
            `<strong>${f.properties.district}</strong><br>Amount: ${formatCount(f.properties.amount)}`
        ),
    }).addTo(map);
    if (data.map.features.length > 0) map.fitBounds(layer.getBounds());
}

function loadYear(year) {
    fetch(`/api/dashboard?year=${year}`)
        .then(r => r.json())
        .then(render);
}

document.getElementById('year-select').addEventListener('change', e => loadYear(e.target.value));
loadYear(DEFAULT_YEAR);
"#;

/// Render the dashboard page for the initial year.
pub fn render_dashboard(view: &DashboardView) -> String {
    let options: String = view
        .years
        .iter()
        .map(|year| {
            let selected = if *year == view.year { " selected" } else { "" };
            format!(r#"<option value="{year}"{selected}>{year}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("");

    let content = format!(
        r#"<div class="container">
    <div class="cards">
        <div class="card card-amount">
            <div class="card-header">Amount</div>
            <div class="card-value" id="amount-year">{year_total}</div>
            <div class="card-overall" id="amount-overall">Overall: {overall_total}</div>
        </div>
        <div class="card card-volume">
            <div class="card-header">Volume</div>
            <div class="card-value" id="volume-year">{year_volume}</div>
            <div class="card-overall" id="volume-overall">Overall: {overall_volume}</div>
        </div>
    </div>
    <div class="year-picker">
        <label for="year-select">Select Year</label>
        <select id="year-select">{options}</select>
    </div>
    <h2 id="map-title">Total loan amount for the year {year}</h2>
    <div id="map"></div>
</div>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script>const DEFAULT_YEAR = {year};</script>
<script>{js}</script>"#,
        year = view.year,
        year_total = format_count(view.summary.year_total),
        overall_total = format_count(view.summary.overall_total),
        year_volume = format_count(view.summary.year_volume as f64),
        overall_volume = format_count(view.summary.overall_volume as f64),
        js = DASHBOARD_JS,
    );

    build_page("Loan Monitoring Dashboard", &content)
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#652c0e;background:#f9f1dc;}}
.page-header{{background:#ebcf8a;padding:16px 24px;text-align:center;}}
.page-header h1{{font-size:24px;font-weight:600;}}
.page-header p{{font-size:14px;}}
.container{{max-width:960px;margin:0 auto;padding:24px;}}
.cards{{display:flex;gap:16px;justify-content:center;margin-bottom:24px;}}
.card{{border-radius:8px;padding:16px 32px;color:#fff;text-align:center;min-width:180px;}}
.card-amount{{background:#2e7d32;}}
.card-volume{{background:#e65100;}}
.card-header{{font-size:15px;text-transform:uppercase;letter-spacing:0.5px;}}
.card-value{{font-size:32px;font-weight:700;margin:4px 0;}}
.card-overall{{font-size:13px;opacity:0.9;}}
.year-picker{{text-align:center;margin-bottom:24px;}}
.year-picker label{{display:block;font-size:14px;margin-bottom:4px;}}
.year-picker select{{font-size:15px;padding:6px 12px;border:1px solid #aa892c;border-radius:4px;background:#fff;color:#652c0e;}}
#map-title{{font-size:18px;text-align:center;margin-bottom:12px;}}
#map{{height:520px;border-radius:8px;border:1px solid #aa892c;}}
</style>
</head>
<body>
<div class="page-header">
    <h1>Loan Monitoring Dashboard</h1>
    <p>Visualize loan distribution across districts</p>
</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Card figures render as whole numbers with thousands separators.
fn format_count(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000.0), "1,000");
        assert_eq!(format_count(1234567.49), "1,234,567");
        assert_eq!(format_count(-1234.0), "-1,234");
    }

    #[test]
    fn html_escape_covers_markup_characters() {
        assert_eq!(html_escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }
}
