use blog_filter::builder::DatasetBuilder;
use blog_filter::{filter_and_sort, BlogFilter, DatasetBundle, QueryState, SearchPage, SortMode, EMPTY_MESSAGE};
use chrono::{DateTime, Utc};
use utils_common::models::{HashtagDescriptor, PostRecord};

fn post(id: u32, topic: &str, author: &str, date: &str, tags: &[&str]) -> PostRecord {
    PostRecord {
        id,
        blog_topic: topic.to_string(),
        author_name: author.to_string(),
        published_at: DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc),
        hashtags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn alice_and_bob() -> Vec<PostRecord> {
    vec![
        post(1, "Rust Guide", "Alice", "2024-01-01T00:00:00Z", &["rust"]),
        post(2, "Go Basics", "Bob", "2024-06-01T00:00:00Z", &["go"]),
    ]
}

fn authors(posts: &[&PostRecord]) -> Vec<String> {
    posts.iter().map(|p| p.author_name.clone()).collect()
}

#[test]
fn two_post_scenario() {
    let posts = alice_and_bob();

    let by_query = QueryState {
        search_query: "go".to_string(),
        ..QueryState::default()
    };
    assert_eq!(authors(&filter_and_sort(&posts, &by_query)), vec!["Bob"]);

    let by_tag = QueryState {
        selected_tag: Some("rust".to_string()),
        ..QueryState::default()
    };
    assert_eq!(authors(&filter_and_sort(&posts, &by_tag)), vec!["Alice"]);

    let latest = QueryState {
        sort_by: SortMode::Latest,
        ..QueryState::default()
    };
    assert_eq!(authors(&filter_and_sort(&posts, &latest)), vec!["Bob", "Alice"]);
}

#[test]
fn builtin_page_filters_by_author_and_tag() {
    let mut page = SearchPage::with_builtin_dataset();
    let total = page.dataset().posts.len();
    assert_eq!(page.results().total, total);

    page.set_search_query("sarah");
    let view = page.results();
    assert!(view.total > 0);
    assert!(view.cards.iter().all(|c| c.author.to_lowercase().contains("sarah")
        || c.topic.to_lowercase().contains("sarah")));

    page.set_search_query("");
    page.set_selected_tag("python");
    let view = page.results();
    assert_eq!(view.total, 0);
    assert_eq!(view.empty_message.as_deref(), Some(EMPTY_MESSAGE));

    page.select_all();
    assert_eq!(page.results().total, total);
}

#[test]
fn global_store_switches_between_builtin_and_loaded_dataset() {
    let builtin_count = BlogFilter::filter_posts(&QueryState::default()).unwrap().total;
    assert_eq!(builtin_count, blog_filter::dataset::builtin().posts.len());

    let mut builder = DatasetBuilder::new();
    for p in alice_and_bob() {
        builder.add_post(p);
    }
    builder.add_hashtag(HashtagDescriptor { id: 1, name: "rust".to_string() });
    let bytes = builder.build_bundle().unwrap().to_compressed().unwrap();

    let metadata = BlogFilter::load_dataset(&bytes).unwrap();
    assert_eq!(metadata.post_count, 2);

    let state: QueryState = serde_json::from_str(r#"{"sortBy":"latest"}"#).unwrap();
    let view = BlogFilter::filter_posts(&state).unwrap();
    let ids: Vec<u32> = view.cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(view.cards[0].published_on, "6/1/2024");

    let hashtags = BlogFilter::get_hashtags().unwrap();
    assert_eq!(hashtags.len(), 1);

    assert!(BlogFilter::load_dataset(b"not a dataset").is_err());
    // 加载失败不影响已加载的数据集
    assert_eq!(BlogFilter::current_dataset().unwrap().posts.len(), 2);

    BlogFilter::unload_dataset().unwrap();
    let view = BlogFilter::filter_posts(&QueryState::default()).unwrap();
    assert_eq!(view.total, builtin_count);
}

#[test]
fn pages_built_from_a_bundle_keep_their_own_state() {
    let bundle = DatasetBundle::new(alice_and_bob(), Vec::new());
    let mut first = SearchPage::new(bundle.clone());
    let second = SearchPage::new(bundle);

    first.set_search_query("alice");
    assert_eq!(first.results().total, 1);
    assert_eq!(second.results().total, 2);
}
