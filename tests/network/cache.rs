//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    use linguee::network::cache::{Cache, CacheError, DbCache, MemoryCache};

    fn db_cache() -> (TempDir, DbCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = DbCache::open(dir.path().join("cache.redb")).unwrap();
        (dir, cache)
    }

    #[test]
    fn db_set_get() {
        let (_dir, cache) = db_cache();
        cache.set("http://example.com", 200, b"foo bar").unwrap();

        assert_eq!(
            cache.get("http://example.com").unwrap(),
            (200, b"foo bar".to_vec())
        );
    }

    #[test]
    fn db_miss() {
        let (_dir, cache) = db_cache();

        assert!(matches!(
            cache.get("http://example.com"),
            Err(CacheError::NotFound)
        ));
    }

    #[test]
    fn db_empty_and_binary_payloads() {
        let (_dir, cache) = db_cache();
        let binary: Vec<u8> = (0..=255).collect();

        cache.set("http://example.com/empty", 204, b"").unwrap();
        cache.set("http://example.com/binary", 200, &binary).unwrap();

        assert_eq!(
            cache.get("http://example.com/empty").unwrap(),
            (204, Vec::new())
        );
        assert_eq!(cache.get("http://example.com/binary").unwrap(), (200, binary));
    }

    #[test]
    fn db_upsert_replaces() {
        let (_dir, cache) = db_cache();
        cache.set("http://example.com", 200, b"first").unwrap();
        cache.set("http://example.com", 500, b"second").unwrap();

        assert_eq!(cache.len().unwrap(), 1);
        assert_eq!(
            cache.get("http://example.com").unwrap(),
            (500, b"second".to_vec())
        );
    }

    #[test]
    fn db_clear() {
        let (_dir, cache) = db_cache();
        cache.set("http://example.com/a", 200, b"a").unwrap();
        cache.set("http://example.com/b", 200, b"b").unwrap();
        cache.clear().unwrap();

        assert_eq!(cache.len().unwrap(), 0);
        assert!(matches!(
            cache.get("http://example.com/a"),
            Err(CacheError::NotFound)
        ));

        cache.set("http://example.com/a", 200, b"again").unwrap();
        assert_eq!(cache.get("http://example.com/a").unwrap().1, b"again");
    }

    #[test]
    fn db_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.redb");

        {
            let cache = DbCache::open(&path).unwrap();
            cache.set("http://example.com", 200, b"persisted").unwrap();
        }

        let cache = DbCache::open(&path).unwrap();
        assert_eq!(cache.get("http://example.com").unwrap().1, b"persisted");
    }

    #[test]
    fn urls_are_matched_exactly() {
        let cache = MemoryCache::new();
        cache.set("http://example.com/?a=1&b=2", 200, b"x").unwrap();

        assert!(cache.get("http://example.com/?b=2&a=1").is_err());
    }

    fn hammer(cache: Arc<dyn Cache>) {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for j in 0..10 {
                        let url = format!("http://example.com/{}/{}", i, j);
                        cache.set(&url, 200, url.as_bytes()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0..8 {
            for j in 0..10 {
                let url = format!("http://example.com/{}/{}", i, j);
                assert_eq!(cache.get(&url).unwrap().1, url.as_bytes());
            }
        }
    }

    #[test]
    fn memory_concurrent_writers() {
        hammer(Arc::new(MemoryCache::new()));
    }

    #[test]
    fn db_concurrent_writers() {
        let (_dir, cache) = db_cache();
        hammer(Arc::new(cache));
    }
}
