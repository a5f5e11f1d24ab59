#![no_main]

use libfuzzer_sys::fuzz_target;
use pgbitmap::{Bitmap, deserialise_bitmap, deserialise_stream, serialise_stream};

// Arbitrary bytes must never panic the decoders, and whatever they accept
// must re-encode to a stream that decodes to the same set.
fuzz_target!(|data: &[u8]| {
    if let Ok(bitmap) = deserialise_stream(data) {
        let bytes = serialise_stream(&bitmap);
        assert!(bytes.len() <= data.len(), "canonical stream is longer than its input");
        assert_eq!(deserialise_stream(&bytes).unwrap(), bitmap);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(bitmap) = deserialise_bitmap(text) {
            assert_eq!(deserialise_stream(&serialise_stream(&bitmap)).unwrap(), bitmap);
        }
        if let Ok(bitmap) = text.parse::<Bitmap>() {
            assert_eq!(pgbitmap::bitmap_out(&bitmap).parse::<Bitmap>().unwrap(), bitmap);
        }
    }
});
