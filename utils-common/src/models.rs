use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 博客文章记录 - 页面展示和筛选所需的全部字段
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PostRecord {
    /// 文章唯一标识符
    pub id: u32,
    /// 文章主题
    #[serde(rename = "blogTopic")]
    pub blog_topic: String,
    /// 作者名
    pub author_name: String,
    /// 发布时间
    pub published_at: DateTime<Utc>,
    /// 文章标签列表（保持原始顺序）
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl PostRecord {
    /// 文章是否带有指定标签（区分大小写的精确匹配）
    pub fn has_hashtag(&self, tag: &str) -> bool {
        self.hashtags.iter().any(|t| t == tag)
    }
}

/// 标签描述 - 只用于填充标签下拉框，与文章标签没有引用约束
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HashtagDescriptor {
    pub id: u32,
    pub name: String,
}

/// 数据集元数据
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetMetadata {
    /// 文章数量
    pub post_count: usize,
    /// 标签描述数量
    pub hashtag_count: usize,
    /// 数据集创建时间
    pub created_at: DateTime<Utc>,
    /// 数据集版本
    pub version: String,
}
