use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::{fs, io};

use chrono::Duration;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::info;

use crate::config::Config;
use crate::paginator::Paginator;
use crate::query_string::QueryString;
use crate::post::Post;
use crate::related::{related_posts, DEFAULT_RELATED_LIMIT};
use crate::render_cache::{Expire, RenderCache};
use crate::series::{series_nav, series_posts};
use crate::store::PostStore;
use crate::view::index_renderer::IndexRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::view::markdown_to_html;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;
use crate::view::series_renderer::SeriesRenderer;
use crate::view::sitemap_renderer::{Sitemap, StaticPage};

/// Rendered pages go stale quickly so content edits show up without a restart
const CACHE_TTL_MINUTES: i64 = 5;

struct AppState {
    store: PostStore,
    cache: Mutex<RenderCache>,
    config: Config,
}

fn read_template(tpl_dir: &PathBuf, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    fs::read_to_string(full_path)
}

fn html_response(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn error_response(context: &str, e: io::Error) -> web::HttpResponse {
    if e.kind() == io::ErrorKind::NotFound {
        web::HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(format!("Not found: {}", context))
    } else {
        web::HttpResponse::InternalServerError()
            .body(format!("Error rendering {}: {}", context, e))
    }
}

fn get_cur_page(req: &HttpRequest) -> u32 {
    if let Some(query_str) = req.uri().query() {
        let qs = QueryString::from(query_str);
        qs.page()
    } else {
        1
    }
}

// Out-of-range page numbers fall back to the first page. Callers that cache
// by page number must clamp before forming the key, otherwise every bogus
// ?page=N value stores its own copy of page 1.
fn clamp_page(cur_page: u32, page_count: u32) -> u32 {
    match cur_page {
        0 => 1,
        x if x > page_count => 1,
        x => x,
    }
}

// Begin: Redirect region --------
#[web::get("/blog/{slug}")]
async fn view_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", format!("/blog/{}/", path.into_inner()))
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[web::get("/series/{prefix}")]
async fn series_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", format!("/series/{}/", path.into_inner()))
        .content_type("text/html; charset=utf-8")
        .finish()
}
// End: Redirect region --------

fn render_post_page(state: &AppState, slug: &str) -> io::Result<String> {
    let post = match state.store.post_by_slug(slug) {
        Some(post) => post,
        None => return Err(io::Error::new(io::ErrorKind::NotFound, "Could not find post")),
    };

    let all_posts = state.store.all_posts();
    let limit = state.config.defaults.related_limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    let related = related_posts(&post, &all_posts, limit);
    let nav = series_nav(&post, &all_posts, &state.config.series);

    let html_body = markdown_to_html(&post.body)?;

    let template_src = read_template(&state.config.paths.template_dir, "view.tpl")?;
    let renderer = PostRenderer::new(&template_src)?;
    Ok(renderer.render(&post, &html_body, &related, nav.as_ref()))
}

#[web::get("/blog/{slug}/")]
async fn view_post(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let slug = path.into_inner();

    let cache_key = format!("post-{}", slug);
    let rendered = {
        let mut cache = state.cache.lock().unwrap();
        cache.get_or_render(&cache_key, Expire::After(Duration::minutes(CACHE_TTL_MINUTES)), || {
            info!("Rendering post page for {}", slug);
            render_post_page(&state, &slug)
        })
    };

    match rendered {
        Ok(page) => html_response(page.to_string()),
        Err(e) => error_response(&slug, e),
    }
}

fn render_blog_page(state: &AppState, heading: &str, posts: Vec<Post>, cur_page: u32) -> io::Result<String> {
    let page_size = state.config.defaults.page_size;
    let paginator = Paginator::new(&posts, page_size);
    let cur_page = clamp_page(cur_page, paginator.page_count());

    let page: &[Post] = if paginator.page_count() == 0 {
        &[]
    } else {
        match paginator.page(cur_page) {
            Ok(page) => page,
            Err(err_desc) => return Err(io::Error::new(io::ErrorKind::InvalidInput, err_desc)),
        }
    };

    let categories = state.store.all_categories();
    let tags = state.store.all_tags();

    let template_src = read_template(&state.config.paths.template_dir, "postlist.tpl")?;
    let renderer = ListRenderer::new(&template_src)?;
    Ok(renderer.render(heading, page, cur_page, paginator.page_count(), &categories, &tags))
}

#[web::get("/blog")]
async fn blog_list(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let posts = state.store.all_posts();
    let page_count = Paginator::new(&posts, state.config.defaults.page_size).page_count();
    let cur_page = clamp_page(get_cur_page(&req), page_count);

    let cache_key = format!("blog-page-{}", cur_page);
    let rendered = {
        let mut cache = state.cache.lock().unwrap();
        cache.get_or_render(&cache_key, Expire::After(Duration::minutes(CACHE_TTL_MINUTES)), || {
            render_blog_page(&state, "Blog", posts, cur_page)
        })
    };

    match rendered {
        Ok(page) => html_response(page.to_string()),
        Err(e) => error_response("blog", e),
    }
}

#[web::get("/blog/category/{name}")]
async fn blog_by_category(req: HttpRequest, path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let name = path.into_inner();
    let cur_page = get_cur_page(&req);

    let posts = state.store.posts_by_category(&name);
    match render_blog_page(&state, &name, posts, cur_page) {
        Ok(page) => html_response(page),
        Err(e) => error_response(&name, e),
    }
}

#[web::get("/blog/tag/{tag}")]
async fn blog_by_tag(req: HttpRequest, path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let tag = path.into_inner();
    let cur_page = get_cur_page(&req);

    let posts = state.store.posts_by_tag(&tag);
    match render_blog_page(&state, &tag, posts, cur_page) {
        Ok(page) => html_response(page),
        Err(e) => error_response(&tag, e),
    }
}

fn render_series_page(state: &AppState, prefix: &str) -> io::Result<String> {
    let def = match state.config.series.iter().find(|def| def.prefix == prefix) {
        Some(def) => def,
        None => return Err(io::Error::new(io::ErrorKind::NotFound, "Unknown series")),
    };

    let all_posts = state.store.all_posts();
    let members = series_posts(def, &all_posts);

    let template_src = read_template(&state.config.paths.template_dir, "series.tpl")?;
    let renderer = SeriesRenderer::new(&template_src)?;
    Ok(renderer.render(&def.name, &members))
}

#[web::get("/series/{prefix}/")]
async fn series_hub(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let prefix = path.into_inner();
    match render_series_page(&state, &prefix) {
        Ok(page) => html_response(page),
        Err(e) => error_response(&prefix, e),
    }
}

#[web::get("/")]
async fn index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let render = || -> io::Result<String> {
        let posts = state.store.all_posts();
        let featured = state.store.featured_posts();
        let template_src = read_template(&state.config.paths.template_dir, "index.tpl")?;
        let renderer = IndexRenderer::new(&template_src)?;
        Ok(renderer.render(posts.len(), &featured))
    };

    match render() {
        Ok(page) => html_response(page),
        Err(e) => error_response("index", e),
    }
}

#[web::get("/about")]
async fn about(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match read_template(&state.config.paths.template_dir, "about.tpl") {
        Ok(page) => html_response(page),
        Err(e) => error_response("about", e),
    }
}

#[web::get("/feed.xml")]
async fn feed(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let site = &state.config.site;
    let rss = RssChannel {
        ch_title: site.title.as_str(),
        ch_link: site.base_url.as_str(),
        ch_desc: site.description.as_str(),
    };

    let posts = state.store.all_posts();
    match rss.render(&posts) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering feed: {}", e)),
    }
}

#[web::get("/sitemap.xml")]
async fn sitemap(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let mut static_pages = vec![
        StaticPage { path: "/", change_freq: "weekly", priority: "1.0" },
        StaticPage { path: "/blog", change_freq: "weekly", priority: "0.8" },
        StaticPage { path: "/about", change_freq: "monthly", priority: "0.7" },
    ];
    for def in state.config.series.iter() {
        static_pages.push(StaticPage {
            path: def.hub_url.as_str(),
            change_freq: "weekly",
            priority: "0.8",
        });
    }

    let site_map = Sitemap { base_url: state.config.site.base_url.as_str() };
    let posts = state.store.all_posts();
    match site_map.render(&static_pages, &posts) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/xml; charset=utf-8")
            .body(xml),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering sitemap: {}", e)),
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let store = PostStore::new(config.paths.posts_dir.clone());
    for post in store.all_posts().iter() {
        info!("Post: {}", post.slug);
    }

    let cache = if config.defaults.rendering_cache_enabled {
        RenderCache::new()
    } else {
        RenderCache::non_caching()
    };

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        store,
        cache: Mutex::new(cache),
        config,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(about)
            .service(public_files)
            .service(feed)
            .service(sitemap)
            .service(blog_list)
            .service(blog_by_category)
            .service(blog_by_tag)
            .service(view_post)
            .service(view_wo_slash)
            .service(series_hub)
            .service(series_wo_slash)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page_bounds() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(1, 3), 1);
        assert_eq!(clamp_page(3, 3), 3);
        assert_eq!(clamp_page(4, 3), 1);
        assert_eq!(clamp_page(999_999, 3), 1);
        assert_eq!(clamp_page(u32::MAX, 0), 1);
    }

    #[test]
    fn test_out_of_range_pages_share_one_cache_key() {
        let key_for = |page: u32| format!("blog-page-{}", clamp_page(page, 2));
        assert_eq!(key_for(999_999), key_for(0));
        assert_eq!(key_for(u32::MAX), "blog-page-1");
        assert_ne!(key_for(2), key_for(1));
    }
}
