use std::path::Path;

use actix_files::Files;
use actix_files::NamedFile;
use actix_web::dev::fn_service;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;

/// Serve the built front end from `static_dir`, mounted at `/`.
///
/// Paths that don't match a file get `static_dir/index.html`, so client-side
/// routes survive a page reload. Must be registered -after- every other route,
/// since it claims the whole path space.
pub fn static_assets(static_dir: &Path) -> Files {
    let index = static_dir.join("index.html");
    Files::new("/", static_dir)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(index).await?;
                let resp = file.into_response(&req);
                Ok::<_, actix_web::Error>(ServiceResponse::new(req, resp))
            }
        }))
}
