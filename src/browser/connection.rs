use anyhow::Result;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 连接到已启动的浏览器并获取页面
///
/// 指定 `target_title` 时优先复用标题匹配的页面，否则新建空白页面。
pub async fn connect_to_browser_and_page(
    port: u16,
    target_title: Option<&str>,
) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);
    debug!("目标标题: {:?}", target_title);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        e
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    if let Some(title) = target_title {
        let pages = browser.pages().await?;
        debug!("获取到 {} 个页面", pages.len());

        let mut titles = Vec::with_capacity(pages.len());
        for p in pages.iter() {
            let page_title = p.get_title().await.ok().flatten();
            debug!("检查页面标题: {:?}", page_title);
            titles.push(page_title);
        }

        if let Some(index) = find_page_by_title(&titles, title) {
            info!("✓ 找到目标页面: {}", titles[index].as_deref().unwrap_or_default());
            return Ok((browser, pages[index].clone()));
        }
        debug!("未找到匹配的页面，将创建新页面");
    }

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建空白页面失败: {}", e);
        e
    })?;

    Ok((browser, page))
}

/// 返回第一个标题包含 `target` 的页面下标，读不到标题的页面跳过
pub fn find_page_by_title(titles: &[Option<String>], target: &str) -> Option<usize> {
    titles
        .iter()
        .position(|t| t.as_deref().is_some_and(|t| t.contains(target)))
}
