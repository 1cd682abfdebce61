//! Server-Rendered Pages
//!
//! Plain HTML assembled with format strings. Every interpolated value goes
//! through [`escape_html`].

use crate::domain::Beer;

/// Escape a value for safe interpolation into HTML text or attributes
pub fn escape_html(raw: &str) -> String {
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

/// Shared document shell
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem auto; max-width: 44rem; }}
  table {{ border-collapse: collapse; width: 100%; }}
  th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }}
  p.notice {{ color: #2e7d32; }}
  div.errors {{ color: #b71c1c; border: 1px solid #b71c1c; padding: 0.5rem 1rem; margin-bottom: 1rem; }}
  form.inline {{ display: inline; }}
  label {{ display: block; margin-top: 0.6rem; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// Index page: heading, notice line, inventory table, New Beer link
pub fn index_page(beers: &[Beer], notice: Option<&str>) -> String {
    let notice_html = notice
        .map(|n| format!("<p class=\"notice\">{}</p>\n", escape_html(n)))
        .unwrap_or_default();

    let rows: String = beers
        .iter()
        .map(|beer| {
            format!(
                "<tr>\
                 <td>{brand}</td>\
                 <td>{country}</td>\
                 <td>{quantity}</td>\
                 <td>{style}</td>\
                 <td><a href=\"/beers/{id}/edit\">Edit</a></td>\
                 <td><form class=\"inline\" action=\"/beers/{id}/destroy\" method=\"post\">\
                 <button type=\"submit\" onclick=\"return confirm('Are you sure?');\">Destroy</button>\
                 </form></td>\
                 </tr>\n",
                brand = escape_html(&beer.brand),
                country = escape_html(&beer.country),
                quantity = beer.quantity,
                style = escape_html(&beer.style),
                id = beer.id,
            )
        })
        .collect();

    let table = if beers.is_empty() {
        "<p>No beers yet.</p>\n".to_string()
    } else {
        format!(
            "<table>\n<tr><th>Brand</th><th>Country</th><th>Quantity</th><th>Style</th><th></th><th></th></tr>\n{rows}</table>\n"
        )
    };

    let body = format!(
        "{notice_html}<h1>Beers</h1>\n{table}<br>\n<a href=\"/beers/new\">New Beer</a>\n"
    );
    layout("Beers", &body)
}

/// Pre-filled field values for the form page
#[derive(Debug)]
pub struct FormValues {
    pub brand: String,
    pub country: String,
    pub quantity: String,
    pub style: String,
}

impl FormValues {
    pub fn empty() -> Self {
        Self {
            brand: String::new(),
            country: String::new(),
            quantity: String::new(),
            style: String::new(),
        }
    }
}

impl From<&Beer> for FormValues {
    fn from(beer: &Beer) -> Self {
        Self {
            brand: beer.brand.clone(),
            country: beer.country.clone(),
            quantity: beer.quantity.to_string(),
            style: beer.style.clone(),
        }
    }
}

/// Creation/edit form. `errors` re-renders the page after a rejected submit.
pub fn form_page(
    heading: &str,
    action: &str,
    submit_label: &str,
    values: &FormValues,
    errors: &[String],
) -> String {
    let error_html = if errors.is_empty() {
        String::new()
    } else {
        let items: String = errors
            .iter()
            .map(|e| format!("<li>{}</li>", escape_html(e)))
            .collect();
        let noun = if errors.len() == 1 { "error" } else { "errors" };
        format!(
            "<div class=\"errors\"><h2>{} {noun} prohibited this beer from being saved:</h2><ul>{items}</ul></div>\n",
            errors.len()
        )
    };

    let body = format!(
        "<h1>{heading}</h1>\n\
         {error_html}\
         <form action=\"{action}\" method=\"post\">\n\
         <label>Brand <input type=\"text\" name=\"brand\" value=\"{brand}\"></label>\n\
         <label>Country <input type=\"text\" name=\"country\" value=\"{country}\"></label>\n\
         <label>Quantity <input type=\"text\" name=\"quantity\" value=\"{quantity}\"></label>\n\
         <label>Style <input type=\"text\" name=\"style\" value=\"{style}\"></label>\n\
         <br>\n\
         <button type=\"submit\">{submit_label}</button>\n\
         </form>\n\
         <br>\n\
         <a href=\"/\">Back</a>\n",
        heading = escape_html(heading),
        action = escape_html(action),
        brand = escape_html(&values.brand),
        country = escape_html(&values.country),
        quantity = escape_html(&values.quantity),
        style = escape_html(&values.style),
        submit_label = escape_html(submit_label),
    );
    layout(heading, &body)
}

/// 404 page for unknown beer ids
pub fn not_found_page(raw_id: &str) -> String {
    let body = format!(
        "<h1>Beer not found</h1>\n<p>No beer with id {}.</p>\n<a href=\"/\">Back</a>\n",
        escape_html(raw_id)
    );
    layout("Beer not found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn beer(brand: &str) -> Beer {
        Beer {
            id: Uuid::new_v4(),
            brand: brand.to_string(),
            country: "Belgium".to_string(),
            quantity: 6,
            style: "Tripel".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>"a" & 'b'</script>"#),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Westmalle"), "Westmalle");
    }

    #[test]
    fn test_index_page_heading_and_rows() {
        let beers = vec![beer("Westmalle"), beer("Rochefort")];
        let html = index_page(&beers, None);
        assert!(html.contains("<h1>Beers</h1>"));
        assert!(html.contains("Westmalle"));
        assert!(html.contains("Rochefort"));
        assert!(html.contains("New Beer"));
    }

    #[test]
    fn test_index_page_notice_is_escaped() {
        let html = index_page(&[], Some("<b>created</b>"));
        assert!(html.contains("&lt;b&gt;created&lt;/b&gt;"));
        assert!(!html.contains("<b>created</b>"));
    }

    #[test]
    fn test_index_page_empty_state() {
        let html = index_page(&[], None);
        assert!(html.contains("No beers yet."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_form_page_errors_block() {
        let values = FormValues::empty();
        let html = form_page(
            "New Beer",
            "/beers",
            "Create Beer",
            &values,
            &["Brand can't be blank".to_string(), "Country can't be blank".to_string()],
        );
        assert!(html.contains("2 errors prohibited this beer from being saved"));
        assert!(html.contains("Brand can&#39;t be blank"));
    }

    #[test]
    fn test_form_page_prefills_values() {
        let b = beer("Duvel");
        let html = form_page(
            "Editing Beer",
            &format!("/beers/{}", b.id),
            "Update Beer",
            &FormValues::from(&b),
            &[],
        );
        assert!(html.contains("value=\"Duvel\""));
        assert!(html.contains("value=\"6\""));
        assert!(html.contains("Update Beer"));
    }
}
