use scraper::{ElementRef, Html, Selector};

/// A rating row found in result markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRowMarkup {
    pub source: String,
    pub candidate: String,
    pub current: f64,
}

/// A like/dislike row found in result markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRowMarkup {
    pub candidate: String,
    pub codes: Vec<i32>,
}

/// Rows are `tr[data-source][data-candidate]` holding a `.star-rating`
/// container. A missing or unparseable `data-current` reads as 0.
pub fn extract_rating_rows(html: &str) -> Vec<RatingRowMarkup> {
    let doc = Html::parse_fragment(html);
    let (Ok(row_sel), Ok(container_sel)) = (
        Selector::parse("tr[data-source][data-candidate]"),
        Selector::parse(".star-rating"),
    ) else {
        return Vec::new();
    };

    doc.select(&row_sel)
        .filter_map(|row| {
            let container = row.select(&container_sel).next()?;
            Some(RatingRowMarkup {
                source: attr(row, "data-source")?,
                candidate: attr(row, "data-candidate")?,
                current: container
                    .value()
                    .attr("data-current")
                    .and_then(|raw| raw.trim().parse::<f64>().ok())
                    .filter(|value| value.is_finite())
                    .unwrap_or(0.0),
            })
        })
        .collect()
}

/// Rows are `tr[data-candidate]` holding `.feedback-btn[data-label]` buttons
/// with integer codes. Rows without a usable button are skipped.
pub fn extract_reaction_rows(html: &str) -> Vec<ReactionRowMarkup> {
    let doc = Html::parse_fragment(html);
    let (Ok(row_sel), Ok(button_sel)) = (
        Selector::parse("tr[data-candidate]"),
        Selector::parse(".feedback-btn[data-label]"),
    ) else {
        return Vec::new();
    };

    doc.select(&row_sel)
        .filter_map(|row| {
            let codes: Vec<i32> = row
                .select(&button_sel)
                .filter_map(|button| button.value().attr("data-label")?.trim().parse().ok())
                .collect();
            if codes.is_empty() {
                return None;
            }
            Some(ReactionRowMarkup {
                candidate: attr(row, "data-candidate")?,
                codes,
            })
        })
        .collect()
}

fn attr(element: ElementRef, name: &str) -> Option<String> {
    element.value().attr(name).map(ToOwned::to_owned)
}
