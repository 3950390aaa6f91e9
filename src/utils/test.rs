#[cfg(test)]
mod tests {
    use crate::utils::{epoch_millis, get_id};

    #[test]
    fn test_get_id() {
        let id1 = get_id();
        let id2 = get_id();
        let id3 = get_id();

        assert!(id1 < id2);
        assert!(id2 < id3);
        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_epoch_millis_advances() {
        let a = epoch_millis();
        // 2020-01-01 in milliseconds; any sane clock is past this
        assert!(a > 1_577_836_800_000);

        std::thread::sleep(std::time::Duration::from_millis(5));
        let b = epoch_millis();
        assert!(b >= a);
    }
}
