use crate::models::WooRequest;
use crate::store::{DashboardStats, WooRequestSummary};

/// Main dashboard: aggregate statistics plus the most recent WOO requests.
pub fn dashboard_page(stats: &DashboardStats, recent: &[WooRequest]) -> String {
    let mut rows = String::new();
    for request in recent {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&request.request_id),
            escape(request.requester_name.as_deref().unwrap_or("-")),
            escape(&request.status),
            request.request_date,
            request
                .due_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ));
    }

    let body = format!(
        "<h1>Email Archief Dashboard</h1>\n\
         <ul class=\"stats\">\n\
         <li>Totaal emails: <strong>{total}</strong></li>\n\
         <li>Laatste 7 dagen: <strong>{week}</strong></li>\n\
         <li>Vertrouwelijk: <strong>{confidential}</strong></li>\n\
         <li>Gekoppeld aan zaken: <strong>{linked}</strong></li>\n\
         <li>Totale opslag: <strong>{bytes} bytes</strong></li>\n\
         </ul>\n\
         <h2>Recente WOO verzoeken</h2>\n\
         <table>\n\
         <tr><th>Verzoek</th><th>Indiener</th><th>Status</th><th>Datum</th><th>Deadline</th></tr>\n\
         {rows}</table>\n\
         <p><a href=\"/search\">Zoeken</a> | <a href=\"/woo\">WOO overzicht</a></p>",
        total = stats.total_emails,
        week = stats.emails_last_week,
        confidential = stats.confidential_emails,
        linked = stats.linked_to_cases,
        bytes = stats.total_storage_bytes,
    );

    layout("Email Archief", &body)
}

/// Static search form; results are fetched from the JSON endpoint.
pub fn search_page() -> String {
    let body = "<h1>Email zoeken</h1>\n\
         <form id=\"search-form\">\n\
         <label>Zoekterm <input type=\"text\" name=\"query\"></label>\n\
         <label>Vanaf <input type=\"date\" name=\"date_from\"></label>\n\
         <label>Tot en met <input type=\"date\" name=\"date_to\"></label>\n\
         <label>Classificatie <select name=\"classification\">\n\
         <option value=\"all\">Alle</option>\n\
         <option value=\"unclassified\">Ongeclassificeerd</option>\n\
         <option value=\"intern\">Intern</option>\n\
         <option value=\"openbaar\">Openbaar</option>\n\
         <option value=\"vertrouwelijk\">Vertrouwelijk</option>\n\
         </select></label>\n\
         <button type=\"submit\">Zoeken</button>\n\
         </form>\n\
         <pre id=\"results\"></pre>\n\
         <script>\n\
         document.getElementById('search-form').addEventListener('submit', async (event) => {\n\
           event.preventDefault();\n\
           const form = new FormData(event.target);\n\
           const payload = Object.fromEntries([...form.entries()].filter(([, v]) => v !== ''));\n\
           const response = await fetch('/api/search', {\n\
             method: 'POST',\n\
             headers: {'content-type': 'application/json'},\n\
             body: JSON.stringify(payload),\n\
           });\n\
           document.getElementById('results').textContent =\n\
             JSON.stringify(await response.json(), null, 2);\n\
         });\n\
         </script>";

    layout("Email zoeken", body)
}

/// WOO dashboard: every request with its matched-email count.
pub fn woo_page(requests: &[WooRequestSummary]) -> String {
    let mut rows = String::new();
    for summary in requests {
        let request = &summary.request;
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&request.request_id),
            escape(request.requester_name.as_deref().unwrap_or("-")),
            escape(request.request_description.as_deref().unwrap_or("-")),
            escape(&request.status),
            request
                .due_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| "-".to_string()),
            summary.matched_emails,
        ));
    }

    let body = format!(
        "<h1>WOO verzoeken</h1>\n\
         <table>\n\
         <tr><th>Verzoek</th><th>Indiener</th><th>Omschrijving</th>\
         <th>Status</th><th>Deadline</th><th>Gevonden emails</th></tr>\n\
         {rows}</table>\n\
         <p><a href=\"/\">Dashboard</a></p>"
    );

    layout("WOO verzoeken", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"nl\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem; }}\n\
         table {{ border-collapse: collapse; }}\n\
         td, th {{ border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }}\n\
         label {{ display: block; margin-bottom: 0.5rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>",
        title = escape(title),
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_values() {
        assert_eq!(escape("<script>\"&\""), "&lt;script&gt;&quot;&amp;&quot;");
    }

    #[test]
    fn dashboard_page_shows_stats_and_requests() {
        let stats = DashboardStats {
            total_emails: 5,
            emails_last_week: 2,
            confidential_emails: 1,
            linked_to_cases: 5,
            total_storage_bytes: 5940,
        };
        let page = dashboard_page(&stats, &[]);
        assert!(page.contains("Totaal emails: <strong>5</strong>"));
        assert!(page.contains("Totale opslag: <strong>5940 bytes</strong>"));
    }

    #[test]
    fn search_page_offers_the_all_classification() {
        let page = search_page();
        assert!(page.contains("value=\"all\""));
        assert!(page.contains("/api/search"));
    }
}
