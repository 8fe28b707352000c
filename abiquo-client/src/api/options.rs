//! 列表查询选项

use urlencoding::encode;

/// 列表端点的过滤与分页选项
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// 模糊过滤关键字
    pub filter: Option<String>,

    /// 页码 (从 1 开始)
    pub page: Option<u32>,

    /// 每页数量
    pub results: Option<u32>,
}

impl ListOptions {
    /// 把选项拼接为查询串
    pub fn append_to(&self, url: &str) -> String {
        let mut params = Vec::new();

        if let Some(filter) = &self.filter {
            params.push(format!("filter={}", encode(filter)));
        }
        if let Some(page) = self.page {
            params.push(format!("page={page}"));
        }
        if let Some(results) = self.results {
            params.push(format!("numResults={results}"));
        }

        if params.is_empty() {
            url.to_string()
        } else {
            format!("{url}?{}", params.join("&"))
        }
    }
}
