//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::sync::Arc;

    use linguee::network::cache::{Cache, MemoryCache};
    use linguee::network::session::Session;

    const USER_AGENT: &str = "Linguee API proxy at tests (https://github.com/imankulov/linguee-api)";

    #[test]
    fn sends_user_agent() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/page")
            .match_header("user-agent", USER_AGENT)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<p>hello</p>")
            .expect(1)
            .create();

        let session = Session::new(None);
        let text = session
            .fetch(USER_AGENT, &format!("{}/page", server.url()))
            .unwrap();

        assert_eq!(text, "<p>hello</p>");
        mock.assert();
    }

    #[test]
    fn transcodes_declared_charset() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/latin1")
            .with_header("content-type", "text/html; charset=\"ISO-8859-1\"")
            .with_body(b"<p>ol\xe1, obrigado</p>")
            .create();

        let text = Session::new(None)
            .fetch(USER_AGENT, &format!("{}/latin1", server.url()))
            .unwrap();

        assert_eq!(text, "<p>olá, obrigado</p>");
        mock.assert();
    }

    #[test]
    fn unknown_charset_falls_back_to_utf8() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/klingon")
            .with_header("content-type", "text/html; charset=klingon")
            .with_body("olá".as_bytes())
            .create();

        let text = Session::new(None)
            .fetch(USER_AGENT, &format!("{}/klingon", server.url()))
            .unwrap();

        assert_eq!(text, "olá");
    }

    #[test]
    fn cache_stores_transcoded_text() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/latin1")
            .with_header("content-type", "text/html; charset=iso-8859-1")
            .with_body(b"ol\xe1")
            .create();

        let cache = Arc::new(MemoryCache::new());
        let session = Session::new(Some(cache.clone() as Arc<dyn Cache>));
        let url = format!("{}/latin1", server.url());
        session.fetch(USER_AGENT, &url).unwrap();

        assert_eq!(cache.get(&url).unwrap(), (200, "olá".as_bytes().to_vec()));
    }

    #[test]
    fn cache_hit_skips_network() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/page")
            .with_body("fresh")
            .expect(1)
            .create();

        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
        let session = Session::new(Some(cache));
        let url = format!("{}/page", server.url());

        assert_eq!(session.fetch(USER_AGENT, &url).unwrap(), "fresh");
        assert_eq!(session.fetch(USER_AGENT, &url).unwrap(), "fresh");
        mock.assert();
    }

    #[test]
    fn prefilled_cache_is_served_verbatim() {
        let cache = Arc::new(MemoryCache::new());
        cache
            .set("http://127.0.0.1:9/never", 200, "cached page".as_bytes())
            .unwrap();

        let session = Session::new(Some(cache as Arc<dyn Cache>));

        assert_eq!(
            session.fetch(USER_AGENT, "http://127.0.0.1:9/never").unwrap(),
            "cached page"
        );
    }

    #[test]
    fn error_status_is_still_returned_and_cached() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/gone")
            .with_status(404)
            .with_body("not here")
            .create();

        let cache = Arc::new(MemoryCache::new());
        let session = Session::new(Some(cache.clone() as Arc<dyn Cache>));
        let url = format!("{}/gone", server.url());

        assert_eq!(session.fetch(USER_AGENT, &url).unwrap(), "not here");
        assert_eq!(cache.get(&url).unwrap().0, 404);
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use linguee::network::cache::{Cache, CacheError, MemoryCache};
    use linguee::network::session::{FetchError, Session};

    /// Cache whose storage is unreadable and unwritable
    #[derive(Default)]
    struct BrokenCache {
        writes: AtomicUsize,
    }

    impl Cache for BrokenCache {
        fn get(&self, _url: &str) -> Result<(u16, Vec<u8>), CacheError> {
            Err(CacheError::Io(io::Error::new(io::ErrorKind::Other, "disk unreadable")))
        }

        fn set(&self, _url: &str, _status_code: u16, _content: &[u8]) -> Result<(), CacheError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::Io(io::Error::new(io::ErrorKind::Other, "disk full")))
        }

        fn clear(&self) -> Result<(), CacheError> {
            Ok(())
        }
    }

    #[test]
    fn broken_cache_falls_through_to_network() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/page")
            .with_body("fresh")
            .expect(1)
            .create();

        let cache = Arc::new(BrokenCache::default());
        let session = Session::new(Some(cache.clone() as Arc<dyn Cache>));

        let text = session
            .fetch("tests", &format!("{}/page", server.url()))
            .unwrap();

        assert_eq!(text, "fresh");
        assert_eq!(cache.writes.load(Ordering::SeqCst), 1);
        mock.assert();
    }

    #[test]
    fn connection_refused() {
        let cache = Arc::new(MemoryCache::new());
        let session = Session::new(Some(cache.clone() as Arc<dyn Cache>));

        let result = session.fetch("tests", "http://127.0.0.1:9/page");

        assert!(matches!(result, Err(FetchError::Http(_))));
        assert!(cache.is_empty());
    }
}
