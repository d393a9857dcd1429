use chrono::{DateTime, Utc};
use serde::Serialize;
use utils_common::models::PostRecord;

/// 没有匹配结果时的提示
pub const EMPTY_MESSAGE: &str = "No blogs found matching your search.";

/// 文章卡片 - 页面上一条结果
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PostCard {
    pub id: u32,
    pub topic: String,
    pub author: String,
    /// 格式化后的发布日期
    pub published_on: String,
    pub hashtags: Vec<String>,
}

impl From<&PostRecord> for PostCard {
    fn from(post: &PostRecord) -> Self {
        Self {
            id: post.id,
            topic: post.blog_topic.clone(),
            author: post.author_name.clone(),
            published_on: format_publish_date(&post.published_at),
            hashtags: post.hashtags.clone(),
        }
    }
}

/// 结果视图 - 返回给页面渲染
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchView {
    /// 文章卡片
    pub cards: Vec<PostCard>,
    /// 结果总数
    pub total: usize,
    /// 结果为空时的提示文本
    pub empty_message: Option<String>,
}

impl SearchView {
    pub fn from_posts(posts: &[&PostRecord]) -> Self {
        let cards: Vec<PostCard> = posts.iter().map(|post| PostCard::from(*post)).collect();
        let total = cards.len();
        let empty_message = if cards.is_empty() {
            Some(EMPTY_MESSAGE.to_string())
        } else {
            None
        };

        Self {
            cards,
            total,
            empty_message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// 发布日期，格式 M/D/YYYY
pub fn format_publish_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// 标签下拉框的滚动进度（百分比，范围 0-100）
///
/// 内容没有溢出时返回 0。
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let max_scroll = scroll_height - client_height;
    if !(max_scroll > 0.0) {
        return 0.0;
    }

    let percent = scroll_top / max_scroll * 100.0;
    if percent.is_nan() {
        return 0.0;
    }

    percent.clamp(0.0, 100.0)
}
