use crate::error::{Result, ScoutError};
use crate::models::{Price, UnitListing};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Placeholder for fields the page does not provide
pub const NOT_FOUND: &str = "Not found";

/// Units parsed from a single property page
#[derive(Debug)]
pub struct PropertyPage {
    pub name: String,
    /// One entry per unit container, so a malformed unit does not hide its siblings
    pub units: Vec<Result<UnitListing>>,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| ScoutError::Selector(css.to_string()))
}

/// Collect property page links from a search-results page
pub fn extract_property_links(html: &str, base_url: &str) -> Result<Vec<String>> {
    let base = Url::parse(base_url)?;
    let document = Html::parse_document(html);
    let wrapper_selector = selector("li.mortar-wrapper")?;
    let link_selector = selector("a.property-link")?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for wrapper in document.select(&wrapper_selector) {
        let Some(href) = wrapper
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };

        let resolved = match base.join(href.trim()) {
            Ok(url) => url.to_string(),
            Err(e) => {
                debug!("Ignoring unusable property link {:?}: {}", href, e);
                continue;
            }
        };

        if seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }

    Ok(links)
}

pub fn extract_property_name(document: &Html) -> Result<String> {
    let name_selector = selector("div.propertyName")?;

    let name = match document.select(&name_selector).next() {
        Some(element) => element
            .text()
            .collect::<String>()
            .replace("media gallery", "")
            .replace("\n Unit", "")
            .trim()
            .replace('\n', " "),
        None => NOT_FOUND.to_string(),
    };

    Ok(name)
}

/// Rent text such as `$1,450`; anything non-numeric is "Call for Rent"
pub fn parse_price(text: &str) -> Price {
    match clean_number(text).parse::<u32>() {
        Ok(amount) => Price::Amount(amount),
        Err(_) => Price::CallForRent,
    }
}

pub fn parse_square_footage(text: &str) -> Result<u32> {
    clean_number(text)
        .parse::<u32>()
        .map_err(|_| ScoutError::Parse(format!("unrecognised square footage {:?}", text)))
}

fn clean_number(text: &str) -> String {
    text.replace(['$', ','], "").trim().to_string()
}

/// Text of the first classless `<span>` inside the given column
fn column_text(container: ElementRef<'_>, column_css: &str) -> Result<String> {
    let column_selector = selector(column_css)?;
    let span_selector = selector("span:not([class])")?;

    container
        .select(&column_selector)
        .next()
        .and_then(|column| column.select(&span_selector).next())
        .map(|span| span.text().collect::<String>().trim().to_string())
        .ok_or_else(|| ScoutError::Parse(format!("unit is missing {}", column_css)))
}

pub fn extract_available_from(container: ElementRef<'_>, today: NaiveDate) -> Result<String> {
    let date_selector = selector("span.dateAvailable")?;

    let text = container
        .select(&date_selector)
        .next()
        .map(visible_text)
        .unwrap_or_default();
    let text = text.trim();

    let available_from = if text.is_empty() {
        NOT_FOUND.to_string()
    } else if text.eq_ignore_ascii_case("now") {
        today.format("%B %d").to_string()
    } else {
        text.to_string()
    };

    Ok(available_from)
}

/// Direct text plus child elements, minus screen-reader labels
fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if !el.classes().any(|class| class == "screenReaderOnly") => {
                if let Some(child) = ElementRef::wrap(child) {
                    out.extend(child.text());
                }
            }
            _ => {}
        }
    }

    out
}

pub fn extract_unit(
    container: ElementRef<'_>,
    property_name: &str,
    link: &str,
    today: NaiveDate,
) -> Result<UnitListing> {
    let price = parse_price(&column_text(container, "div.pricingColumn")?);
    let square_footage = parse_square_footage(&column_text(container, "div.sqftColumn")?)?;
    let available_from = extract_available_from(container, today)?;

    Ok(UnitListing {
        property_name: property_name.to_string(),
        link: link.to_string(),
        price,
        square_footage,
        available_from,
    })
}

/// Parse every unit container on a property page
pub fn extract_units(html: &str, link: &str, today: NaiveDate) -> Result<PropertyPage> {
    let document = Html::parse_document(html);
    let name = extract_property_name(&document)?;
    let unit_selector = selector("li.unitContainer")?;

    let units = document
        .select(&unit_selector)
        .map(|container| extract_unit(container, &name, link, today))
        .collect();

    Ok(PropertyPage { name, units })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_URL: &str = "https://www.apartments.com/apartments/under-1900/";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn unit_li(price: &str, sqft: &str, available: &str) -> String {
        format!(
            r#"<li class="unitContainer">
                <div class="pricingColumn column"><span class="screenReaderOnly">price</span><span>{price}</span></div>
                <div class="sqftColumn column"><span class="screenReaderOnly">square feet</span><span>{sqft}</span></div>
                <span class="dateAvailable"><span class="screenReaderOnly">availability</span>{available}</span>
            </li>"#
        )
    }

    fn property_page(units: &[String]) -> String {
        format!(
            r#"<html><body>
                <div class="propertyName">
                    Maple Court media gallery
                </div>
                <ul>{}</ul>
            </body></html>"#,
            units.concat()
        )
    }

    #[test]
    fn collects_links_from_mortar_wrappers() {
        let html = r#"<ul>
            <li class="mortar-wrapper"><a class="property-link" href="https://www.apartments.com/maple-court/abc/">Maple</a></li>
            <li class="mortar-wrapper"><a class="other" href="/ignored/">x</a></li>
            <li class="mortar-wrapper"><a class="property-link" href="/oak-lofts/def/">Oak</a></li>
            <li class="mortar-wrapper"><a class="property-link" href="https://www.apartments.com/maple-court/abc/">Maple again</a></li>
            <li class="ad"><a class="property-link" href="/not-a-result/">Ad</a></li>
        </ul>"#;

        let links = extract_property_links(html, SEARCH_URL).unwrap();

        assert_eq!(
            links,
            vec![
                "https://www.apartments.com/maple-court/abc/".to_string(),
                "https://www.apartments.com/oak-lofts/def/".to_string(),
            ]
        );
    }

    #[test]
    fn property_name_strips_gallery_label() {
        let document = Html::parse_document(&property_page(&[]));
        assert_eq!(extract_property_name(&document).unwrap(), "Maple Court");
    }

    #[test]
    fn property_name_joins_lines() {
        let document = Html::parse_document(
            "<div class=\"propertyName\">Unit 4B\n Unit\nRiver House</div>",
        );
        assert_eq!(extract_property_name(&document).unwrap(), "Unit 4B River House");
    }

    #[test]
    fn missing_property_name_is_not_found() {
        let document = Html::parse_document("<html><body></body></html>");
        assert_eq!(extract_property_name(&document).unwrap(), NOT_FOUND);
    }

    #[test]
    fn price_falls_back_to_call_for_rent() {
        assert_eq!(parse_price(" $1,450 "), Price::Amount(1450));
        assert_eq!(parse_price("$ 1,450"), Price::Amount(1450));
        assert_eq!(parse_price("Call for Rent"), Price::CallForRent);
        assert_eq!(parse_price("$1,450 - $1,600"), Price::CallForRent);
    }

    #[test]
    fn square_footage_must_be_numeric() {
        assert_eq!(parse_square_footage("1,020").unwrap(), 1020);
        assert_eq!(parse_square_footage("$ 900").unwrap(), 900);
        assert!(matches!(
            parse_square_footage("Studio"),
            Err(ScoutError::Parse(_))
        ));
    }

    #[test]
    fn parses_units_with_availability() {
        let html = property_page(&[
            unit_li("$1,450", "750", "Nov 1"),
            unit_li("Call for Rent", "820", "Now"),
            unit_li("$1,300", "690", ""),
        ]);

        let page = extract_units(&html, "https://www.apartments.com/maple-court/abc/", today())
            .unwrap();
        let units: Vec<UnitListing> = page.units.into_iter().map(|u| u.unwrap()).collect();

        assert_eq!(page.name, "Maple Court");
        assert_eq!(units.len(), 3);

        assert_eq!(units[0].price, Price::Amount(1450));
        assert_eq!(units[0].square_footage, 750);
        assert_eq!(units[0].available_from, "Nov 1");
        assert_eq!(units[0].property_name, "Maple Court");
        assert_eq!(units[0].link, "https://www.apartments.com/maple-court/abc/");

        assert_eq!(units[1].price, Price::CallForRent);
        assert_eq!(units[1].available_from, "October 19");

        assert_eq!(units[2].available_from, NOT_FOUND);
    }

    #[test]
    fn malformed_unit_does_not_hide_siblings() {
        let html = property_page(&[
            unit_li("$1,450", "Studio", "Now"),
            r#"<li class="unitContainer"><div class="pricingColumn"><span>$900</span></div></li>"#
                .to_string(),
            unit_li("$1,500", "800", "Dec 5"),
        ]);

        let page = extract_units(&html, "https://www.apartments.com/x/", today()).unwrap();

        assert_eq!(page.units.len(), 3);
        assert!(page.units[0].is_err());
        assert!(page.units[1].is_err());
        assert_eq!(page.units[2].as_ref().unwrap().square_footage, 800);
    }
}
