use crate::models::{QueryState, SortMode};
use utils_common::models::PostRecord;

/// 标签下拉框中"全部"选项的取值
pub const ALL_TAGS: &str = "all";

/// 按查询状态筛选并排序文章
///
/// 返回新的有序列表，不修改 `posts`。
pub fn filter_and_sort<'a>(posts: &'a [PostRecord], state: &QueryState) -> Vec<&'a PostRecord> {
    let mut filtered = if shows_everything(state) {
        // 选中"全部"且搜索为空时直接返回完整数据集
        posts.iter().collect::<Vec<_>>()
    } else {
        let query = state.search_query.to_lowercase();
        posts
            .iter()
            .filter(|post| matches_query(post, &query))
            .filter(|post| matches_tag(post, state.selected_tag.as_deref()))
            .collect::<Vec<_>>()
    };

    apply_sorting(&mut filtered, &state.sort_by);

    filtered
}

/// 主题或作者（忽略大小写）包含查询文本，`query` 需已转为小写
pub fn matches_query(post: &PostRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    post.blog_topic.to_lowercase().contains(query) || post.author_name.to_lowercase().contains(query)
}

/// 标签筛选，未选择或选择"全部"时不缩小范围
pub fn matches_tag(post: &PostRecord, selected_tag: Option<&str>) -> bool {
    match selected_tag {
        Some(tag) if tag != ALL_TAGS => post.has_hashtag(tag),
        _ => true,
    }
}

fn shows_everything(state: &QueryState) -> bool {
    state.selected_tag.as_deref() == Some(ALL_TAGS) && state.search_query.is_empty()
}

// 稳定排序，发布时间相同的文章保持原有相对顺序
fn apply_sorting(posts: &mut [&PostRecord], sort_by: &SortMode) {
    match sort_by {
        SortMode::Latest => {
            posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        }
        SortMode::Oldest => {
            posts.sort_by(|a, b| a.published_at.cmp(&b.published_at));
        }
        SortMode::Default | SortMode::Unrecognized(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn post(id: u32, topic: &str, author: &str, date: &str, tags: &[&str]) -> PostRecord {
        PostRecord {
            id,
            blog_topic: topic.to_string(),
            author_name: author.to_string(),
            published_at: DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc),
            hashtags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn dataset() -> Vec<PostRecord> {
        vec![
            post(1, "Rust Guide", "Alice", "2024-01-01T00:00:00Z", &["rust"]),
            post(2, "Go Basics", "Bob", "2024-06-01T00:00:00Z", &["go"]),
            post(3, "Async Rust", "Carol", "2023-03-10T00:00:00Z", &["rust", "async"]),
            post(4, "Gopher Tales", "Alice", "2024-06-01T00:00:00Z", &["go", "Rust"]),
        ]
    }

    fn ids(posts: &[&PostRecord]) -> Vec<u32> {
        posts.iter().map(|p| p.id).collect()
    }

    fn state(query: &str, tag: Option<&str>, sort: &str) -> QueryState {
        QueryState {
            search_query: query.to_string(),
            selected_tag: tag.map(str::to_string),
            sort_by: SortMode::parse(sort),
        }
    }

    #[test]
    fn empty_state_keeps_dataset_order() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &QueryState::default());
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn query_matches_topic_or_author_ignoring_case() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &state("RUST", None, ""));
        assert_eq!(ids(&result), vec![1, 3]);

        let result = filter_and_sort(&posts, &state("alice", None, ""));
        assert_eq!(ids(&result), vec![1, 4]);
    }

    #[test]
    fn every_excluded_post_fails_the_query() {
        let posts = dataset();
        let query = "go";
        let result = filter_and_sort(&posts, &state(query, None, ""));
        let kept = ids(&result);

        for p in &posts {
            assert_eq!(kept.contains(&p.id), matches_query(p, query));
        }
    }

    #[test]
    fn tag_filter_is_exact_and_case_sensitive() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &state("", Some("rust"), ""));
        assert_eq!(ids(&result), vec![1, 3]);

        let result = filter_and_sort(&posts, &state("", Some("Rust"), ""));
        assert_eq!(ids(&result), vec![4]);
    }

    #[test]
    fn unknown_tag_yields_empty_result() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &state("", Some("python"), ""));
        assert!(result.is_empty());
    }

    #[test]
    fn query_and_tag_combine() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &state("alice", Some("go"), ""));
        assert_eq!(ids(&result), vec![4]);
    }

    #[test]
    fn all_tag_with_empty_query_returns_everything() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &state("", Some(ALL_TAGS), ""));
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn all_tag_with_empty_query_still_sorts() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &state("", Some(ALL_TAGS), "latest"));
        assert_eq!(ids(&result), vec![2, 4, 1, 3]);
    }

    #[test]
    fn all_tag_with_query_only_applies_the_query() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &state("bob", Some(ALL_TAGS), ""));
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn latest_sorts_descending_with_stable_ties() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &state("", None, "latest"));
        assert_eq!(ids(&result), vec![2, 4, 1, 3]);
        assert!(result.windows(2).all(|w| w[0].published_at >= w[1].published_at));
    }

    #[test]
    fn oldest_sorts_ascending_with_stable_ties() {
        let posts = dataset();
        let result = filter_and_sort(&posts, &state("", None, "oldest"));
        assert_eq!(ids(&result), vec![3, 1, 2, 4]);
        assert!(result.windows(2).all(|w| w[0].published_at <= w[1].published_at));
    }

    #[test]
    fn unrecognized_sort_behaves_like_default() {
        let posts = dataset();
        let unsorted = filter_and_sort(&posts, &state("a", None, "default"));
        let fallback = filter_and_sort(&posts, &state("a", None, "title_asc"));
        assert_eq!(ids(&unsorted), ids(&fallback));
    }

    #[test]
    fn repeated_runs_do_not_touch_the_dataset() {
        let posts = dataset();
        let before = posts.clone();
        let query = state("o", Some("go"), "oldest");

        let first = ids(&filter_and_sort(&posts, &query));
        let second = ids(&filter_and_sort(&posts, &query));
        assert_eq!(first, second);
        assert_eq!(posts, before);
    }
}
