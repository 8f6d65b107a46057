use pretty_assertions::assert_eq;
use similar_engine::{extract_rating_rows, extract_reaction_rows, RatingRowMarkup, ReactionRowMarkup};

const RATING_TABLE: &str = r#"
<p>Found in 0.42 s</p>
<table>
  <tr><th>Title</th><th>Rating</th></tr>
  <tr data-source="src.fb2" data-candidate="a.fb2">
    <td>A</td>
    <td><div class="star-rating" data-current="0.6">
      <span class="star" data-value="1"></span><span class="star" data-value="2"></span>
      <span class="star" data-value="3"></span><span class="star" data-value="4"></span>
      <span class="star" data-value="5"></span>
      <span class="reset-rating"></span><span class="negative-rating"></span>
    </div></td>
  </tr>
  <tr data-source="src.fb2" data-candidate="b.fb2">
    <td>B</td><td><div class="star-rating"></div></td>
  </tr>
  <tr data-source="src.fb2" data-candidate="c.fb2">
    <td>C</td><td><div class="star-rating" data-current="n/a"></div></td>
  </tr>
  <tr data-source="src.fb2" data-candidate="d.fb2"><td>no widget</td></tr>
</table>
"#;

#[test]
fn rating_rows_are_read_from_markup() {
    let rows = extract_rating_rows(RATING_TABLE);
    assert_eq!(
        rows,
        vec![
            RatingRowMarkup {
                source: "src.fb2".to_string(),
                candidate: "a.fb2".to_string(),
                current: 0.6,
            },
            RatingRowMarkup {
                source: "src.fb2".to_string(),
                candidate: "b.fb2".to_string(),
                current: 0.0,
            },
            RatingRowMarkup {
                source: "src.fb2".to_string(),
                candidate: "c.fb2".to_string(),
                current: 0.0,
            },
        ]
    );
}

#[test]
fn reaction_rows_are_read_from_markup() {
    let html = r#"
    <table>
      <tr data-candidate="a.fb2">
        <td><button class="feedback-btn" data-label="1">like</button>
            <button class="feedback-btn" data-label="0">dislike</button></td>
      </tr>
      <tr data-candidate="b.fb2">
        <td><button class="feedback-btn" data-label="oops">?</button></td>
      </tr>
    </table>
    "#;
    assert_eq!(
        extract_reaction_rows(html),
        vec![ReactionRowMarkup {
            candidate: "a.fb2".to_string(),
            codes: vec![1, 0],
        }]
    );
}

#[test]
fn markup_without_rows_yields_nothing() {
    assert!(extract_rating_rows("<p class=\"error\">request failed</p>").is_empty());
    assert!(extract_reaction_rows("").is_empty());
}
