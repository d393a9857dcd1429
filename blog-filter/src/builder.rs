use crate::models::DatasetBundle;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use utils_common::models::{DatasetMetadata, HashtagDescriptor, PostRecord};

/// 数据集构建器
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    posts: Vec<PostRecord>,
    hashtags: Vec<HashtagDescriptor>,
}

impl DatasetBuilder {
    /// 创建新的数据集构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加文章
    pub fn add_post(&mut self, post: PostRecord) {
        self.posts.push(post);
    }

    /// 添加标签描述
    pub fn add_hashtag(&mut self, hashtag: HashtagDescriptor) {
        self.hashtags.push(hashtag);
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// 从文章中补充标签描述，按首次出现顺序追加，已有名称跳过
    ///
    /// 返回新增的标签数量。
    pub fn derive_hashtags_from_posts(&mut self) -> usize {
        let mut known: HashSet<String> = self.hashtags.iter().map(|h| h.name.clone()).collect();
        let mut next_id = self.hashtags.iter().map(|h| h.id).max().map_or(1, |id| id + 1);
        let mut added = 0;

        for post in &self.posts {
            for tag in &post.hashtags {
                if known.insert(tag.clone()) {
                    self.hashtags.push(HashtagDescriptor {
                        id: next_id,
                        name: tag.clone(),
                    });
                    next_id += 1;
                    added += 1;
                }
            }
        }

        added
    }

    /// 构建数据集
    pub fn build_bundle(&self) -> Result<DatasetBundle, String> {
        if self.posts.is_empty() {
            return Err("无法构建数据集: 没有文章数据".to_string());
        }

        let mut post_ids = HashSet::new();
        for post in &self.posts {
            if !post_ids.insert(post.id) {
                return Err(format!("文章ID重复: {}", post.id));
            }
        }

        let mut tag_ids = HashSet::new();
        for tag in &self.hashtags {
            if !tag_ids.insert(tag.id) {
                return Err(format!("标签ID重复: {} ({})", tag.id, tag.name));
            }
        }

        println!("开始构建数据集，文章数量: {}, 标签数量: {}", self.posts.len(), self.hashtags.len());

        Ok(DatasetBundle::new(self.posts.clone(), self.hashtags.clone()))
    }

    /// 保存数据集到文件
    pub fn save_bundle(&self, path: &str) -> Result<DatasetMetadata, String> {
        println!("开始保存数据集到文件: {}", path);

        let bundle = self.build_bundle()?;

        let compressed_data = bundle
            .to_compressed()
            .map_err(|e| format!("压缩数据集失败: {}", e))?;
        println!("数据压缩成功，压缩后大小: {} 字节", compressed_data.len());

        let mut file = File::create(path).map_err(|e| format!("无法创建数据集文件: {}", e))?;
        file.write_all(&compressed_data)
            .map_err(|e| format!("无法写入数据集文件: {}", e))?;

        println!("数据集已成功写入文件: {}", path);

        Ok(bundle.metadata)
    }
}
