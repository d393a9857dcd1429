use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use utils_common::compression as utils;
use utils_common::models::{DatasetMetadata, HashtagDescriptor, PostRecord};

/// 数据集格式版本
pub const DATASET_VERSION: [u8; 2] = utils::CURRENT_VERSION;

/// 数据集 - 文章列表、标签描述和元数据
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetBundle {
    /// 所有文章（保持原始顺序）
    pub posts: Vec<PostRecord>,
    /// 标签下拉框的候选项（保持原始顺序）
    pub hashtags: Vec<HashtagDescriptor>,
    /// 元数据
    pub metadata: DatasetMetadata,
}

impl DatasetBundle {
    /// 由文章和标签描述直接构造，不做校验
    pub fn new(posts: Vec<PostRecord>, hashtags: Vec<HashtagDescriptor>) -> Self {
        let metadata = DatasetMetadata {
            post_count: posts.len(),
            hashtag_count: hashtags.len(),
            created_at: Utc::now(),
            version: format!("{}.{}", DATASET_VERSION[0], DATASET_VERSION[1]),
        };

        Self {
            posts,
            hashtags,
            metadata,
        }
    }

    /// 从压缩的二进制数据恢复数据集
    pub fn from_compressed(data: &[u8]) -> Result<Self, io::Error> {
        utils::from_compressed_with_max_version(data, DATASET_VERSION[0])
    }

    /// 序列化为压缩的二进制数据
    pub fn to_compressed(&self) -> Result<Vec<u8>, io::Error> {
        utils::to_compressed(self, DATASET_VERSION)
    }
}

/// JSON 形式的数据源 - 内置数据集和 `hashtags.json` 使用
#[derive(Deserialize, Debug, Default)]
pub struct DatasetSource {
    #[serde(default)]
    pub posts: Vec<PostRecord>,
    #[serde(default)]
    pub hashtags: Vec<HashtagDescriptor>,
}

/// 排序方式
///
/// 只识别 `default`、`latest`、`oldest` 三个值。其它字符串保存在
/// `Unrecognized` 中用于显示，筛选时与 `Default` 相同，不重新排序。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum SortMode {
    /// 保持数据集顺序
    #[default]
    Default,
    /// 按发布时间降序
    Latest,
    /// 按发布时间升序
    Oldest,
    /// 未识别的值
    Unrecognized(String),
}

impl SortMode {
    /// 解析排序字符串，空字符串视为默认
    pub fn parse(value: &str) -> Self {
        match value {
            "" | "default" => SortMode::Default,
            "latest" => SortMode::Latest,
            "oldest" => SortMode::Oldest,
            other => SortMode::Unrecognized(other.to_string()),
        }
    }

    /// 显示用的标签
    pub fn label(&self) -> &str {
        match self {
            SortMode::Default => "default",
            SortMode::Latest => "latest",
            SortMode::Oldest => "oldest",
            SortMode::Unrecognized(label) => label,
        }
    }
}

impl From<String> for SortMode {
    fn from(value: String) -> Self {
        SortMode::parse(&value)
    }
}

impl From<SortMode> for String {
    fn from(mode: SortMode) -> Self {
        mode.label().to_string()
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 查询状态 - 搜索框、标签下拉框和排序下拉框的当前值
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryState {
    /// 搜索文本
    pub search_query: String,
    /// 选中的标签，`None` 表示不筛选，`"all"` 为全部
    pub selected_tag: Option<String>,
    /// 排序方式
    pub sort_by: SortMode,
}
