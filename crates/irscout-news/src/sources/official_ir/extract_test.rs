use super::*;

fn page() -> Url {
    Url::parse("https://ir.acme.example/news/").unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn extract(html: &str, cutoff: NaiveDate) -> Vec<NewsItem> {
    extract_ir_items(html, &page(), "ACME", cutoff, ExtractionPolicy::default())
}

const PRESS_LIST: &str = r##"
<html><body>
  <nav>
    <a href="/">Home</a>
    <a href="/contact">Contact</a>
  </nav>
  <ul class="releases">
    <li>
      <span class="date">October 14, 2026</span>
      <a href="/news/acme-q3-results">Acme Reports Third Quarter Results</a>
    </li>
    <li>
      <span class="date">Oct 12, 2026</span>
      <a href="https://cdn.acme.example/pr/pricing.pdf">Acme Prices Senior Notes Offering</a>
    </li>
    <li>
      <span class="date">2026-09-01</span>
      <a href="/news/old">Acme Attends Investor Conference</a>
    </li>
  </ul>
  <footer>© 2026 Acme Corp. All rights reserved.</footer>
</body></html>
"##;

#[test]
fn extracts_dated_headlines_from_release_list() {
    let items = extract(PRESS_LIST, day(2026, 10, 7));

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].date(), day(2026, 10, 14));
    assert_eq!(items[0].headline(), "Acme Reports Third Quarter Results");
    assert_eq!(
        items[0].link(),
        "https://ir.acme.example/news/acme-q3-results"
    );
    assert_eq!(items[0].source(), NewsSource::OfficialIr);
    assert_eq!(items[1].link(), "https://cdn.acme.example/pr/pricing.pdf");
}

#[test]
fn dates_before_cutoff_are_dropped() {
    let items = extract(PRESS_LIST, day(2026, 10, 13));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].date(), day(2026, 10, 14));
}

#[test]
fn relative_links_resolve_against_page_url() {
    let html = r#"<div><p>Oct 14, 2026</p><a href="release-1">Acme opens new facility in Ohio</a></div>"#;
    let items = extract(html, day(2026, 10, 1));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].link(), "https://ir.acme.example/news/release-1");
}

#[test]
fn short_link_text_is_not_a_headline() {
    let html = r#"<div><span>Oct 14, 2026</span><a href="/pdf/1">PDF</a><a href="/more">Read more</a></div>"#;
    assert!(extract(html, day(2026, 10, 1)).is_empty());
}

#[test]
fn mailto_javascript_and_fragment_links_are_rejected() {
    let html = r##"
      <div><span>Oct 14, 2026</span><a href="mailto:ir@acme.example">Email investor relations team</a></div>
      <div><span>Oct 13, 2026</span><a href="javascript:openRelease(3)">Acme names new finance chief</a></div>
      <div><span>Oct 12, 2026</span><a href="#release-2">Acme completes share buyback</a></div>
    "##;
    assert!(extract(html, day(2026, 10, 1)).is_empty());
}

#[test]
fn ancestor_search_is_bounded() {
    let html = r#"
      <section>
        <a href="/far-away">Headline far above the date node</a>
        <section><section><section><section><section><section>
          <span>Oct 14, 2026</span>
        </section></section></section></section></section></section>
      </section>
    "#;
    assert!(extract(html, day(2026, 10, 1)).is_empty());

    let deep = ExtractionPolicy {
        max_ancestor_depth: 8,
        ..ExtractionPolicy::default()
    };
    let items = extract_ir_items(html, &page(), "ACME", day(2026, 10, 1), deep);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].link(), "https://ir.acme.example/far-away");
}

#[test]
fn long_containers_are_not_date_nodes() {
    let filler = "Acme designs and builds widgets for industrial customers. ".repeat(4);
    let html = format!(
        r#"<div><p>{filler} Founded Oct 1, 1990.</p><a href="/about">About Acme Corporation</a></div>"#
    );
    assert!(extract(&html, day(1990, 1, 1)).is_empty());
}

#[test]
fn page_without_dates_yields_nothing() {
    let html = r#"<div><a href="/news/1">Acme Reports Third Quarter Results</a></div>"#;
    assert!(extract(html, day(2026, 10, 1)).is_empty());
}
