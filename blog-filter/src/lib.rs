use wasm_bindgen::prelude::*;
use once_cell::sync::OnceCell;
use std::sync::Mutex;
use utils_common::models::{DatasetMetadata, HashtagDescriptor};

// 导出模块
pub mod builder;
pub mod dataset;
pub mod engine;
pub mod models;
pub mod page;
pub mod view;

pub use engine::{filter_and_sort, ALL_TAGS};
pub use models::{DatasetBundle, QueryState, SortMode};
pub use page::SearchPage;
pub use view::{scroll_progress, PostCard, SearchView, EMPTY_MESSAGE};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// 全局数据集存储，未加载时使用内置数据集
static DATASET: OnceCell<Mutex<Option<DatasetBundle>>> = OnceCell::new();

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 输出日志，浏览器中写入控制台
pub(crate) fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{}", message);
}

/// 博客筛选器 - 管理全局数据集并执行筛选
pub struct BlogFilter;

impl BlogFilter {
    /// 加载压缩的数据集，替换之前加载的数据
    pub fn load_dataset(data: &[u8]) -> Result<DatasetMetadata, String> {
        let bundle = match DatasetBundle::from_compressed(data) {
            Ok(bundle) => bundle,
            Err(e) => {
                log(&format!("数据集解析失败: {}", e));
                return Err(format!("解析数据集失败: {}", e));
            }
        };

        let metadata = bundle.metadata.clone();
        let store = DATASET.get_or_init(|| Mutex::new(None));
        let mut guard = store.lock().map_err(|_| "获取数据集锁失败")?;
        *guard = Some(bundle);

        log(&format!(
            "数据集加载完成，文章: {}，标签: {}",
            metadata.post_count, metadata.hashtag_count
        ));
        Ok(metadata)
    }

    /// 卸载已加载的数据集，回到内置数据集
    pub fn unload_dataset() -> Result<(), String> {
        if let Some(store) = DATASET.get() {
            let mut guard = store.lock().map_err(|_| "获取数据集锁失败")?;
            *guard = None;
        }
        Ok(())
    }

    // 在当前数据集上执行操作
    fn with_dataset<R>(f: impl FnOnce(&DatasetBundle) -> R) -> Result<R, String> {
        match DATASET.get() {
            Some(store) => {
                let guard = store.lock().map_err(|_| "获取数据集锁失败")?;
                Ok(f(guard.as_ref().unwrap_or_else(|| dataset::builtin())))
            }
            None => Ok(f(dataset::builtin())),
        }
    }

    /// 当前数据集的副本
    pub fn current_dataset() -> Result<DatasetBundle, String> {
        Self::with_dataset(|bundle| bundle.clone())
    }

    /// 获取标签下拉框的标签描述
    pub fn get_hashtags() -> Result<Vec<HashtagDescriptor>, String> {
        Self::with_dataset(|bundle| bundle.hashtags.clone())
    }

    /// 筛选文章
    pub fn filter_posts(state: &QueryState) -> Result<SearchView, String> {
        Self::with_dataset(|bundle| SearchView::from_posts(&filter_and_sort(&bundle.posts, state)))
    }
}

/// 博客筛选器JS接口 - 提供给JavaScript使用的无状态API
#[wasm_bindgen]
pub struct BlogFilterJS;

#[wasm_bindgen]
impl BlogFilterJS {
    /// 加载数据集
    #[wasm_bindgen]
    pub fn init(index_data: &[u8]) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        BlogFilter::load_dataset(index_data)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e))
    }

    /// 获取所有标签描述
    #[wasm_bindgen]
    pub fn get_hashtags() -> Result<JsValue, JsValue> {
        let hashtags = BlogFilter::get_hashtags().map_err(|e| JsValue::from_str(&e))?;

        serde_wasm_bindgen::to_value(&hashtags)
            .map_err(|e| JsValue::from_str(&format!("序列化标签失败: {}", e)))
    }

    /// 按查询状态JSON筛选文章
    #[wasm_bindgen]
    pub fn filter_posts(state_json: &str) -> Result<JsValue, JsValue> {
        let state: QueryState = serde_json::from_str(state_json)
            .map_err(|e| JsValue::from_str(&format!("解析参数失败: {}", e)))?;

        let result = BlogFilter::filter_posts(&state).map_err(|e| JsValue::from_str(&e))?;

        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
    }

    /// 标签下拉框滚动进度
    #[wasm_bindgen]
    pub fn scroll_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
        view::scroll_progress(scroll_top, scroll_height, client_height)
    }
}

/// 搜索页JS接口 - 页面持有的有状态句柄
#[wasm_bindgen]
pub struct SearchPageJS {
    inner: SearchPage,
}

#[wasm_bindgen]
impl SearchPageJS {
    /// 使用当前数据集创建搜索页
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SearchPageJS, JsValue> {
        let dataset = BlogFilter::current_dataset().map_err(|e| JsValue::from_str(&e))?;
        Ok(SearchPageJS {
            inner: SearchPage::new(dataset),
        })
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.inner.set_search_query(query);
    }

    /// 传入 `undefined` 取消标签筛选
    pub fn set_selected_tag(&mut self, tag: Option<String>) {
        match tag {
            Some(tag) => self.inner.set_selected_tag(tag),
            None => self.inner.clear_tag(),
        }
    }

    pub fn set_sort_by(&mut self, sort_by: &str) {
        self.inner.set_sort_by(sort_by);
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// 当前结果视图
    pub fn results(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.results())
            .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
    }

    pub fn tag_button_label(&self) -> String {
        self.inner.tag_button_label()
    }

    pub fn sort_button_label(&self) -> String {
        self.inner.sort_button_label()
    }

    pub fn hashtag_options(&self) -> js_sys::Array {
        self.inner
            .hashtag_options()
            .into_iter()
            .map(|name| JsValue::from_str(&name))
            .collect()
    }
}
