//! Hot-list sources known to the aggregator

/// One ranked list the aggregator can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotListSource {
    Zhihu,
    Weibo,
    Baidu,
    Douban,
    Toutiao,
    Bilibili,
    Douyin,
    Kuaishou,
    Hupu,
    Weread,
    Geekpark,
    Guokr,
    NeteaseNews,
    SinaNews,
    Kr36,
    Ithome,
    ThePaper,
    QqNews,
    Cls,
    Jin10,
    WallStreet,
    Yicai,
    Caixin,
    Juejin,
    Csdn,
    HelloGithub,
    Github,
    DoubanGroup,
    Tieba,
    DoubanMovie,
    StarRail,
    Genshin,
    Lol,
}

impl HotListSource {
    pub const ALL: [HotListSource; 33] = [
        HotListSource::Zhihu,
        HotListSource::Weibo,
        HotListSource::Baidu,
        HotListSource::Douban,
        HotListSource::Toutiao,
        HotListSource::Bilibili,
        HotListSource::Douyin,
        HotListSource::Kuaishou,
        HotListSource::Hupu,
        HotListSource::Weread,
        HotListSource::Geekpark,
        HotListSource::Guokr,
        HotListSource::NeteaseNews,
        HotListSource::SinaNews,
        HotListSource::Kr36,
        HotListSource::Ithome,
        HotListSource::ThePaper,
        HotListSource::QqNews,
        HotListSource::Cls,
        HotListSource::Jin10,
        HotListSource::WallStreet,
        HotListSource::Yicai,
        HotListSource::Caixin,
        HotListSource::Juejin,
        HotListSource::Csdn,
        HotListSource::HelloGithub,
        HotListSource::Github,
        HotListSource::DoubanGroup,
        HotListSource::Tieba,
        HotListSource::DoubanMovie,
        HotListSource::StarRail,
        HotListSource::Genshin,
        HotListSource::Lol,
    ];

    /// Path segment used by the aggregator
    pub const fn slug(self) -> &'static str {
        match self {
            HotListSource::Zhihu => "zhihu",
            HotListSource::Weibo => "weibo",
            HotListSource::Baidu => "baidu",
            HotListSource::Douban => "douban",
            HotListSource::Toutiao => "toutiao",
            HotListSource::Bilibili => "bilibili",
            HotListSource::Douyin => "douyin",
            HotListSource::Kuaishou => "kuaishou",
            HotListSource::Hupu => "hupu",
            HotListSource::Weread => "weread",
            HotListSource::Geekpark => "geekpark",
            HotListSource::Guokr => "guokr",
            HotListSource::NeteaseNews => "netease-news",
            HotListSource::SinaNews => "sina-news",
            HotListSource::Kr36 => "36kr",
            HotListSource::Ithome => "ithome",
            HotListSource::ThePaper => "thepaper",
            HotListSource::QqNews => "qq-news",
            HotListSource::Cls => "cls",
            HotListSource::Jin10 => "jin10",
            HotListSource::WallStreet => "wallstreet",
            HotListSource::Yicai => "yicai",
            HotListSource::Caixin => "caixin",
            HotListSource::Juejin => "juejin",
            HotListSource::Csdn => "csdn",
            HotListSource::HelloGithub => "hellogithub",
            HotListSource::Github => "github",
            HotListSource::DoubanGroup => "douban-group",
            HotListSource::Tieba => "tieba",
            HotListSource::DoubanMovie => "douban-movie",
            HotListSource::StarRail => "starrail",
            HotListSource::Genshin => "genshin",
            HotListSource::Lol => "lol",
        }
    }

    /// Human-readable list name
    pub const fn display_name(self) -> &'static str {
        match self {
            HotListSource::Zhihu => "知乎",
            HotListSource::Weibo => "微博",
            HotListSource::Baidu => "百度",
            HotListSource::Douban => "豆瓣",
            HotListSource::Toutiao => "头条",
            HotListSource::Bilibili => "哔哩哔哩",
            HotListSource::Douyin => "抖音",
            HotListSource::Kuaishou => "快手",
            HotListSource::Hupu => "虎扑",
            HotListSource::Weread => "微信读书",
            HotListSource::Geekpark => "极客公园",
            HotListSource::Guokr => "果壳",
            HotListSource::NeteaseNews => "网易新闻",
            HotListSource::SinaNews => "新浪新闻",
            HotListSource::Kr36 => "36氪",
            HotListSource::Ithome => "IT之家",
            HotListSource::ThePaper => "澎湃新闻",
            HotListSource::QqNews => "QQ新闻",
            HotListSource::Cls => "财联社",
            HotListSource::Jin10 => "金十数据",
            HotListSource::WallStreet => "华尔街见闻",
            HotListSource::Yicai => "第一财经",
            HotListSource::Caixin => "财新网",
            HotListSource::Juejin => "掘金",
            HotListSource::Csdn => "CSDN",
            HotListSource::HelloGithub => "HelloGitHub",
            HotListSource::Github => "GitHub 趋势",
            HotListSource::DoubanGroup => "豆瓣小组",
            HotListSource::Tieba => "百度贴吧",
            HotListSource::DoubanMovie => "豆瓣电影",
            HotListSource::StarRail => "崩坏：星穹铁道",
            HotListSource::Genshin => "原神",
            HotListSource::Lol => "英雄联盟",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

/// Every slug, in declaration order, for the `type` field's enum
pub const SOURCE_SLUGS: &[&str] = &{
    let mut out = [""; HotListSource::ALL.len()];
    let mut i = 0;
    while i < out.len() {
        out[i] = HotListSource::ALL[i].slug();
        i += 1;
    }
    out
};

/// `slug(name), slug(name), ...` for the field description
pub fn source_catalog() -> String {
    HotListSource::ALL
        .iter()
        .map(|s| format!("{}({})", s.slug(), s.display_name()))
        .collect::<Vec<_>>()
        .join(", ")
}
