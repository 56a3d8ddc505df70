//! Static site endpoints: index page, random image page and JSON, raw file
//! existence check.

use crate::{
    assets::SiteAssets,
    http::{response::Reply, types::StatusCode},
};
use rand::Rng;
use serde_json::json;

/// The random-image lookup table. The only process-wide state, read-only.
pub(crate) const IMAGES: [(&str, &str); 2] = [
    ("streets", "https://iili.io/JV1pSV.jpg"),
    ("bread", "https://iili.io/Jj9MWG.jpg"),
];

/// `/` - serves `root.html` with the `${links}` placeholder replaced by a
/// listing of the site directory.
pub(crate) fn index<A: SiteAssets>(assets: &A) -> Reply {
    let Ok(bytes) = assets.read_file("root.html") else {
        return Reply::html(StatusCode::NotFound, "File not found: root.html");
    };

    let page = String::from_utf8_lossy(&bytes).replace("${links}", &file_list(assets));
    Reply::html(StatusCode::Ok, page)
}

fn file_list<A: SiteAssets>(assets: &A) -> String {
    let names = assets.list_dir().unwrap_or_default();
    if names.is_empty() {
        return "No files in directory".to_owned();
    }

    let mut list = String::from("<ul>\n");
    for name in names {
        list.push_str("<li>");
        list.push_str(&name);
        list.push_str("</li>");
    }
    list.push_str("</ul>\n");
    list
}

/// `/random` - serves the random-image page.
pub(crate) fn random_page<A: SiteAssets>(assets: &A) -> Reply {
    match assets.read_file("index.html") {
        Ok(bytes) => Reply::html(StatusCode::Ok, String::from_utf8_lossy(&bytes)),
        Err(_) => Reply::html(StatusCode::NotFound, "File not found: index.html"),
    }
}

/// `/json` - picks one entry of [`IMAGES`] and answers it as JSON.
pub(crate) fn random_json<R: Rng>(rng: &mut R) -> Reply {
    let (header, image) = IMAGES[rng.random_range(0..IMAGES.len())];

    Reply::json(
        StatusCode::Ok,
        json!({ "header": header, "image": image }).to_string(),
    )
}

/// `file/<path>` - existence check for the literal path text after the
/// first `file/`. File contents are intentionally not transmitted.
pub(crate) fn raw_file<A: SiteAssets>(assets: &A, route_key: &str) -> Reply {
    let path = route_key.replacen("file/", "", 1);

    if assets.file_exists(&path) {
        Reply::html(
            StatusCode::Ok,
            "Would theoretically be a file but removed this part, you do not \
             have to do anything with it for the assignment",
        )
    } else {
        Reply::html(StatusCode::NotFound, format!("File not found: {path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::{collections::HashSet, io};

    pub(crate) struct StubAssets {
        pub files: Vec<(&'static str, &'static str)>,
        pub entries: Vec<&'static str>,
        pub existing: Vec<&'static str>,
    }

    impl StubAssets {
        pub fn empty() -> Self {
            StubAssets {
                files: Vec::new(),
                entries: Vec::new(),
                existing: Vec::new(),
            }
        }
    }

    impl SiteAssets for StubAssets {
        fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
            self.files
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, contents)| contents.as_bytes().to_vec())
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn list_dir(&self) -> io::Result<Vec<String>> {
            Ok(self.entries.iter().map(|s| s.to_string()).collect())
        }

        fn file_exists(&self, path: &str) -> bool {
            self.existing.contains(&path)
        }
    }

    #[test]
    fn index_substitutes_links() {
        let assets = StubAssets {
            files: vec![("root.html", "<html>${links}</html>")],
            entries: vec!["index.html", "root.html"],
            existing: Vec::new(),
        };
        let reply = index(&assets);

        assert_eq!(reply.status(), StatusCode::Ok);
        assert_eq!(
            reply.body(),
            "<html><ul>\n<li>index.html</li><li>root.html</li></ul>\n</html>"
        );
    }

    #[test]
    fn index_with_empty_directory() {
        let assets = StubAssets {
            files: vec![("root.html", "${links}")],
            entries: Vec::new(),
            existing: Vec::new(),
        };

        assert_eq!(index(&assets).body(), "No files in directory");
    }

    #[test]
    fn index_missing_template_is_404() {
        let reply = index(&StubAssets::empty());

        assert_eq!(reply.status(), StatusCode::NotFound);
        assert!(reply.body().contains("root.html"));
    }

    #[test]
    fn random_page_serves_file() {
        let assets = StubAssets {
            files: vec![("index.html", "<html>random</html>")],
            entries: Vec::new(),
            existing: Vec::new(),
        };
        let reply = random_page(&assets);

        assert_eq!(reply.status(), StatusCode::Ok);
        assert_eq!(reply.body(), "<html>random</html>");
    }

    #[test]
    fn random_json_is_deterministic_with_a_seed() {
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);

        assert_eq!(random_json(&mut first), random_json(&mut second));
    }

    #[test]
    fn random_json_covers_the_table() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();

        for _ in 0..64 {
            seen.insert(random_json(&mut rng).body().to_owned());
        }

        assert_eq!(seen.len(), IMAGES.len());
        for body in &seen {
            let value: serde_json::Value = serde_json::from_str(body).unwrap();
            let header = value["header"].as_str().unwrap();
            let image = value["image"].as_str().unwrap();
            assert!(IMAGES.contains(&(header, image)));
        }
    }

    #[test]
    fn raw_file_found() {
        let assets = StubAssets {
            files: Vec::new(),
            entries: Vec::new(),
            existing: vec!["notes.txt"],
        };
        let reply = raw_file(&assets, "file/notes.txt");

        assert_eq!(reply.status(), StatusCode::Ok);
        assert!(reply.body().contains("Would theoretically be a file"));
    }

    #[test]
    fn raw_file_missing_names_the_path() {
        let reply = raw_file(&StubAssets::empty(), "file/missing/deep.txt");

        assert_eq!(reply.status(), StatusCode::NotFound);
        assert_eq!(reply.body(), "File not found: missing/deep.txt");
    }

    #[test]
    fn raw_file_strips_only_the_first_occurrence() {
        let reply = raw_file(&StubAssets::empty(), "file/dir/file/x");

        assert_eq!(reply.body(), "File not found: dir/file/x");
    }
}
