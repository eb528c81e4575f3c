use std::ptr;
use std::sync::Once;
use std::thread;

use ecb_ffi::{ecb_aes_create, ecb_aes_encrypt_block, ecb_aes_release, EcbHandle};

const KEY: &str = "000102030405060708090a0b0c0d0e0f";
const PLAIN: &str = "00112233445566778899aabbccddeeff";
const CIPHER: &str = "69c4e0d86a7b0430d8cdb78070b4c55a";

fn init_tracing() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

fn create(key: &[u8], offset: i32, len: i32) -> EcbHandle {
    unsafe { ecb_aes_create(key.as_ptr(), offset, len) }
}

fn encrypt(handle: EcbHandle, input: &[u8], output: &mut [u8]) -> i32 {
    unsafe {
        ecb_aes_encrypt_block(
            handle,
            input.as_ptr(),
            0,
            input.len() as i32,
            output.as_mut_ptr(),
            0,
        )
    }
}

#[test]
fn create_accepts_only_aes_key_sizes() {
    init_tracing();
    let key = [0x11u8; 40];
    for len in [16, 24, 32] {
        let handle = create(&key, 0, len);
        assert!(!handle.is_null(), "{len}-byte key rejected");
        ecb_aes_release(handle);
    }
    for len in [0, 15, 17, 23, 31, 33, 40] {
        assert!(create(&key, 0, len).is_null(), "{len}-byte key accepted");
    }
}

#[test]
fn create_rejects_bad_arguments() {
    init_tracing();
    let key = [0u8; 16];
    assert!(unsafe { ecb_aes_create(ptr::null(), 0, 16) }.is_null());
    assert!(create(&key, -1, 16).is_null());
    assert!(create(&key, 0, -16).is_null());
}

#[test]
fn known_answer_through_the_abi() {
    init_tracing();
    let key = hex::decode(KEY).unwrap();
    let plain = hex::decode(PLAIN).unwrap();
    let handle = create(&key, 0, 16);

    let mut out = [0u8; 16];
    assert_eq!(encrypt(handle, &plain, &mut out), 16);
    assert_eq!(hex::encode(out), CIPHER);
    ecb_aes_release(handle);
}

#[test]
fn offsets_select_key_input_and_output_regions() {
    init_tracing();
    let mut key_buf = vec![0xffu8; 8];
    key_buf.extend(hex::decode(KEY).unwrap());
    let mut input = vec![0u8; 5];
    input.extend(hex::decode(PLAIN).unwrap());
    let mut output = [0xaau8; 40];

    let handle = create(&key_buf, 8, 16);
    let written = unsafe {
        ecb_aes_encrypt_block(handle, input.as_ptr(), 5, 16, output.as_mut_ptr(), 20)
    };
    assert_eq!(written, 16);
    assert_eq!(hex::encode(&output[20..36]), CIPHER);
    assert!(output[..20].iter().chain(&output[36..]).all(|b| *b == 0xaa));
    ecb_aes_release(handle);
}

#[test]
fn null_handle_writes_nothing() {
    init_tracing();
    let plain = hex::decode(PLAIN).unwrap();
    let mut out = [0x5au8; 16];
    assert_eq!(encrypt(EcbHandle::NULL, &plain, &mut out), 0);
    assert_eq!(out, [0x5a; 16]);
    ecb_aes_release(EcbHandle::NULL);
}

#[test]
fn released_handle_is_rejected() {
    init_tracing();
    let handle = create(&hex::decode(KEY).unwrap(), 0, 16);
    let plain = hex::decode(PLAIN).unwrap();
    let mut out = [0u8; 16];
    assert_eq!(encrypt(handle, &plain, &mut out), 16);

    ecb_aes_release(handle);
    let mut after = [0u8; 16];
    assert_eq!(encrypt(handle, &plain, &mut after), 0);
    assert_eq!(after, [0u8; 16]);
    // A second release is detected and ignored.
    ecb_aes_release(handle);
}

#[test]
fn encrypting_twice_is_deterministic() {
    init_tracing();
    let handle = create(&[0x24u8; 32], 0, 32);
    let block = *b"sixteen byte msg";
    let mut first = [0u8; 16];
    let mut second = [0u8; 16];
    assert_eq!(encrypt(handle, &block, &mut first), 16);
    assert_eq!(encrypt(handle, &block, &mut second), 16);
    assert_eq!(first, second);
    ecb_aes_release(handle);
}

#[test]
fn identical_blocks_give_identical_ciphertext() {
    init_tracing();
    let handle = create(&[0x42u8; 24], 0, 24);
    let mut input = [0u8; 32];
    input[..16].copy_from_slice(b"YELLOW SUBMARINE");
    input[16..].copy_from_slice(b"YELLOW SUBMARINE");
    let mut out = [0u8; 32];
    assert_eq!(encrypt(handle, &input, &mut out), 32);
    assert_eq!(out[..16], out[16..]);
    ecb_aes_release(handle);
}

#[test]
fn invalid_input_lengths_return_zero() {
    init_tracing();
    let handle = create(&[0u8; 16], 0, 16);
    let input = [0u8; 32];
    let mut out = [0x77u8; 32];
    for len in [0, 1, 15, 17, -16] {
        let written = unsafe {
            ecb_aes_encrypt_block(handle, input.as_ptr(), 0, len, out.as_mut_ptr(), 0)
        };
        assert_eq!(written, 0, "length {len}");
    }
    let written = unsafe {
        ecb_aes_encrypt_block(handle, input.as_ptr(), -1, 16, out.as_mut_ptr(), 0)
    };
    assert_eq!(written, 0);
    let written =
        unsafe { ecb_aes_encrypt_block(handle, ptr::null(), 0, 16, out.as_mut_ptr(), 0) };
    assert_eq!(written, 0);
    let written =
        unsafe { ecb_aes_encrypt_block(handle, input.as_ptr(), 0, 16, ptr::null_mut(), 0) };
    assert_eq!(written, 0);
    assert_eq!(out, [0x77u8; 32]);
    ecb_aes_release(handle);
}

#[test]
fn overlapping_input_and_output() {
    init_tracing();
    let handle = create(&hex::decode(KEY).unwrap(), 0, 16);
    let mut buf = hex::decode(PLAIN).unwrap();
    let written = unsafe {
        let p = buf.as_mut_ptr();
        ecb_aes_encrypt_block(handle, p, 0, 16, p, 0)
    };
    assert_eq!(written, 16);
    assert_eq!(hex::encode(&buf), CIPHER);
    ecb_aes_release(handle);
}

#[test]
fn independent_handles_across_threads() {
    init_tracing();
    let workers: Vec<_> = (1u8..=4)
        .map(|seed| {
            thread::spawn(move || {
                let key = [seed; 16];
                let handle = create(&key, 0, 16);
                assert!(!handle.is_null());
                let block = [seed.wrapping_mul(3); 16];
                let mut reference = [0u8; 16];
                assert_eq!(encrypt(handle, &block, &mut reference), 16);
                for _ in 0..100 {
                    let mut out = [0u8; 16];
                    assert_eq!(encrypt(handle, &block, &mut out), 16);
                    assert_eq!(out, reference);
                }
                ecb_aes_release(handle);
                reference
            })
        })
        .collect();
    let outputs: Vec<[u8; 16]> = workers.into_iter().map(|w| w.join().unwrap()).collect();
    for (i, a) in outputs.iter().enumerate() {
        for b in &outputs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
