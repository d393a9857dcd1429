//! 内置数据集
//!
//! 页面未加载外部数据集时使用，编译时嵌入。

use crate::models::{DatasetBundle, DatasetSource};
use once_cell::sync::Lazy;

const BUILTIN_JSON: &str = include_str!("../data/blog_data.json");

// 内容在编译时固定，解析由 builtin_dataset_parses 覆盖
static BUILTIN: Lazy<DatasetBundle> = Lazy::new(|| {
    let source: DatasetSource = serde_json::from_str(BUILTIN_JSON).expect("内置数据集格式无效");
    DatasetBundle::new(source.posts, source.hashtags)
});

/// 获取内置数据集
pub fn builtin() -> &'static DatasetBundle {
    &BUILTIN
}
