use std::fs;
use std::path::Path;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Deserialize;
use walkdir::WalkDir;

use utils_common::compression::validate_compressed_data;
use utils_common::models::{HashtagDescriptor, PostRecord};

use blog_filter::builder::DatasetBuilder;
use blog_filter::dataset;
use blog_filter::models::{DatasetBundle, DatasetSource};
use blog_filter::{SearchPage, SearchView};

/// 标签描述文件名
const HASHTAGS_FILE: &str = "hashtags.json";

/// 文章文件内容：单篇文章或文章数组
#[derive(Deserialize)]
#[serde(untagged)]
enum PostFile {
    Many(Vec<PostRecord>),
    One(PostRecord),
}

// 主函数
fn main() {
    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("build", sub)) => run_build(sub),
        Some(("query", sub)) => run_query(sub),
        Some(("inspect", sub)) => run_inspect(sub),
        _ => Err("未知命令".to_string()),
    };

    if let Err(e) = result {
        eprintln!("错误: {}", e);
        std::process::exit(1);
    }
}

// 命令行参数定义
fn cli() -> Command {
    Command::new("博客数据集工具")
        .version(env!("CARGO_PKG_VERSION"))
        .about("生成和查询博客搜索页使用的数据集")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("build")
                .about("从JSON文件生成数据集")
                .arg(Arg::new("source")
                    .short('s')
                    .long("source")
                    .value_name("SOURCE_DIR")
                    .help("文章JSON文件目录")
                    .required(true))
                .arg(Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("OUTPUT_FILE")
                    .help("数据集输出文件路径")
                    .required(true))
                .arg(Arg::new("derive_hashtags")
                    .short('d')
                    .long("derive-hashtags")
                    .help("从文章标签补充标签描述")
                    .action(ArgAction::SetTrue))
                .arg(Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("显示详细信息")
                    .action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("query")
                .about("在数据集上执行搜索、筛选和排序")
                .arg(Arg::new("dataset")
                    .long("dataset")
                    .value_name("DATASET_FILE")
                    .help("数据集文件，省略时使用内置数据集"))
                .arg(Arg::new("query")
                    .short('q')
                    .long("query")
                    .value_name("TEXT")
                    .help("按主题或作者搜索"))
                .arg(Arg::new("tag")
                    .short('t')
                    .long("tag")
                    .value_name("HASHTAG")
                    .help("按标签筛选，all 表示全部"))
                .arg(Arg::new("sort")
                    .long("sort")
                    .value_name("SORT")
                    .help("排序方式: default, latest, oldest"))
                .arg(Arg::new("json")
                    .long("json")
                    .help("以JSON输出结果")
                    .action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("inspect")
                .about("检查数据集文件")
                .arg(Arg::new("dataset")
                    .long("dataset")
                    .value_name("DATASET_FILE")
                    .help("数据集文件")
                    .required(true)),
        )
}

// 生成数据集
fn run_build(matches: &ArgMatches) -> Result<(), String> {
    let source_dir = matches.get_one::<String>("source").ok_or("缺少源目录参数")?;
    let output_file = matches.get_one::<String>("output").ok_or("缺少输出文件参数")?;
    let derive_hashtags = matches.get_flag("derive_hashtags");
    let verbose = matches.get_flag("verbose");

    let source_path = Path::new(source_dir);
    if !source_path.is_dir() {
        return Err(format!("源目录不存在或不是有效目录 '{}'", source_dir));
    }

    if let Some(parent) = Path::new(output_file).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("无法创建输出目录 '{}': {}", parent.display(), e))?;
        }
    }

    println!("开始生成数据集...");
    println!("源目录: {}", source_dir);
    println!("输出文件: {}", output_file);

    let start_time = std::time::Instant::now();
    let builder = build_from_dir(source_path, derive_hashtags, verbose)?;
    let metadata = builder.save_bundle(output_file)?;

    println!(
        "数据集生成完成！文章: {}，标签: {}，耗时: {:.2}秒",
        metadata.post_count,
        metadata.hashtag_count,
        start_time.elapsed().as_secs_f32()
    );

    Ok(())
}

// 扫描目录并填充构建器
fn build_from_dir(source_dir: &Path, derive_hashtags: bool, verbose: bool) -> Result<DatasetBuilder, String> {
    let source = scan_json_files(source_dir, verbose)?;
    println!("扫描完成。找到 {} 篇文章，{} 个标签描述。", source.posts.len(), source.hashtags.len());

    let mut builder = DatasetBuilder::new();
    for post in source.posts {
        builder.add_post(post);
    }
    for hashtag in source.hashtags {
        builder.add_hashtag(hashtag);
    }

    if derive_hashtags {
        let added = builder.derive_hashtags_from_posts();
        println!("从文章标签补充了 {} 个标签描述", added);
    }

    Ok(builder)
}

// 扫描JSON文件，按文件名排序保证文章顺序稳定
fn scan_json_files(dir_path: &Path, verbose: bool) -> Result<DatasetSource, String> {
    let mut source = DatasetSource::default();

    for entry in WalkDir::new(dir_path).sort_by_file_name() {
        let entry = entry.map_err(|e| format!("遍历目录时出错: {}", e))?;

        if !entry.file_type().is_file() || !entry.path().extension().map_or(false, |ext| ext == "json") {
            continue;
        }

        let content = fs::read_to_string(entry.path())
            .map_err(|e| format!("无法读取文件 {}: {}", entry.path().display(), e))?;

        if entry.file_name() == HASHTAGS_FILE {
            let hashtags: Vec<HashtagDescriptor> = serde_json::from_str(&content)
                .map_err(|e| format!("解析标签文件 {} 失败: {}", entry.path().display(), e))?;
            if verbose {
                println!("标签: {} ({} 个)", entry.path().display(), hashtags.len());
            }
            source.hashtags.extend(hashtags);
            continue;
        }

        let posts = match serde_json::from_str::<PostFile>(&content)
            .map_err(|e| format!("解析文章文件 {} 失败: {}", entry.path().display(), e))?
        {
            PostFile::Many(posts) => posts,
            PostFile::One(post) => vec![post],
        };

        if verbose {
            println!("处理: {} ({} 篇)", entry.path().display(), posts.len());
        }
        source.posts.extend(posts);
    }

    Ok(source)
}

// 加载数据集文件，省略时使用内置数据集
fn load_bundle(path: Option<&String>) -> Result<DatasetBundle, String> {
    match path {
        Some(path) => {
            let data = fs::read(path).map_err(|e| format!("无法读取数据集文件 {}: {}", path, e))?;
            DatasetBundle::from_compressed(&data).map_err(|e| format!("解析数据集失败: {}", e))
        }
        None => Ok(dataset::builtin().clone()),
    }
}

// 执行查询
fn run_query(matches: &ArgMatches) -> Result<(), String> {
    let bundle = load_bundle(matches.get_one::<String>("dataset"))?;
    let page = query_page(
        bundle,
        matches.get_one::<String>("query").map(String::as_str),
        matches.get_one::<String>("tag").map(String::as_str),
        matches.get_one::<String>("sort").map(String::as_str),
    );

    let view = page.results();
    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&view).map_err(|e| format!("序列化结果失败: {}", e))?;
        println!("{}", json);
    } else {
        println!("[{}] [{}]", page.tag_button_label(), page.sort_button_label());
        print!("{}", render_cards(&view));
    }

    Ok(())
}

fn query_page(bundle: DatasetBundle, query: Option<&str>, tag: Option<&str>, sort: Option<&str>) -> SearchPage {
    let mut page = SearchPage::new(bundle);
    if let Some(query) = query {
        page.set_search_query(query);
    }
    if let Some(tag) = tag {
        page.set_selected_tag(tag);
    }
    if let Some(sort) = sort {
        page.set_sort_by(sort);
    }
    page
}

// 文本形式的卡片列表
fn render_cards(view: &SearchView) -> String {
    if let Some(message) = &view.empty_message {
        return format!("{}\n", message);
    }

    let mut output = String::new();
    for card in &view.cards {
        output.push_str(&format!("{}\n", card.topic));
        output.push_str(&format!("  By {}\n", card.author));
        output.push_str(&format!("  Published on: {}\n", card.published_on));
        if !card.hashtags.is_empty() {
            output.push_str(&format!("  {}\n", card.hashtags.join(" ")));
        }
        output.push('\n');
    }
    output.push_str(&format!("共 {} 篇\n", view.total));
    output
}

// 检查数据集文件
fn run_inspect(matches: &ArgMatches) -> Result<(), String> {
    let path = matches.get_one::<String>("dataset").ok_or("缺少数据集参数")?;
    let data = fs::read(path).map_err(|e| format!("无法读取数据集文件 {}: {}", path, e))?;

    let version = validate_compressed_data(&data).map_err(|e| format!("数据集无效: {}", e))?;
    let bundle = DatasetBundle::from_compressed(&data).map_err(|e| format!("解析数据集失败: {}", e))?;

    println!("文件: {} ({} 字节)", path, data.len());
    println!("格式版本: {}.{}", version[0], version[1]);
    println!("文章数量: {}", bundle.metadata.post_count);
    println!("标签数量: {}", bundle.metadata.hashtag_count);
    println!("创建时间: {}", bundle.metadata.created_at.to_rfc3339());
    let age = chrono::Utc::now().signed_duration_since(bundle.metadata.created_at);
    println!("距今: {} 天", age.num_days());

    Ok(())
}
