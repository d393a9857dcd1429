use crate::dataset;
use crate::engine::{filter_and_sort, ALL_TAGS};
use crate::models::{DatasetBundle, QueryState, SortMode};
use crate::view::SearchView;
use utils_common::models::PostRecord;

/// 标签按钮的默认文本
pub const TAG_PLACEHOLDER: &str = "Search By hashtag";
/// 排序按钮的默认文本
pub const SORT_PLACEHOLDER: &str = "Sort By";

/// 搜索页 - 持有数据集和查询状态
///
/// 每次调用 `results` 都会按当前状态重新筛选。
#[derive(Debug, Clone)]
pub struct SearchPage {
    dataset: DatasetBundle,
    state: QueryState,
    // 用户是否选择过排序方式，只影响按钮文本
    sort_selected: bool,
}

impl SearchPage {
    pub fn new(dataset: DatasetBundle) -> Self {
        Self {
            dataset,
            state: QueryState::default(),
            sort_selected: false,
        }
    }

    /// 使用内置数据集
    pub fn with_builtin_dataset() -> Self {
        Self::new(dataset::builtin().clone())
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn dataset(&self) -> &DatasetBundle {
        &self.dataset
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    pub fn set_selected_tag(&mut self, tag: impl Into<String>) {
        self.state.selected_tag = Some(tag.into());
    }

    /// 选择"全部"
    pub fn select_all(&mut self) {
        self.set_selected_tag(ALL_TAGS);
    }

    /// 取消标签筛选
    pub fn clear_tag(&mut self) {
        self.state.selected_tag = None;
    }

    pub fn set_sort_by(&mut self, sort_by: &str) {
        self.state.sort_by = SortMode::parse(sort_by);
        self.sort_selected = !sort_by.is_empty();
    }

    /// 恢复初始状态
    pub fn reset(&mut self) {
        self.state = QueryState::default();
        self.sort_selected = false;
    }

    /// 当前状态下的文章
    pub fn posts(&self) -> Vec<&PostRecord> {
        filter_and_sort(&self.dataset.posts, &self.state)
    }

    /// 当前状态下的结果视图
    pub fn results(&self) -> SearchView {
        SearchView::from_posts(&self.posts())
    }

    pub fn tag_button_label(&self) -> String {
        match &self.state.selected_tag {
            Some(tag) => tag.clone(),
            None => TAG_PLACEHOLDER.to_string(),
        }
    }

    pub fn sort_button_label(&self) -> String {
        if self.sort_selected {
            self.state.sort_by.label().to_string()
        } else {
            SORT_PLACEHOLDER.to_string()
        }
    }

    /// 标签下拉框选项："all" 在前，其后为标签描述顺序
    pub fn hashtag_options(&self) -> Vec<String> {
        std::iter::once(ALL_TAGS.to_string())
            .chain(self.dataset.hashtags.iter().map(|tag| tag.name.clone()))
            .collect()
    }
}
