//! Encrypts two identical blocks and one different block under a fixed key.

use ecb_cipher::{AesBlockCipher, CipherConfig, ProviderKind};

fn main() -> Result<(), ecb_cipher::CipherError> {
    let key = *b"0123456789abcdef";
    let software = AesBlockCipher::new(&key)?;
    let hardware = AesBlockCipher::with_config(
        &CipherConfig::with_provider(ProviderKind::RustCrypto),
        &key,
        0,
        key.len(),
    )?;

    let mut plaintext = [0u8; 48];
    plaintext[..16].copy_from_slice(b"first block here");
    plaintext[16..32].copy_from_slice(b"first block here");
    plaintext[32..].copy_from_slice(b"other block here");

    let mut expected = [0u8; 48];
    software.encrypt(&plaintext, &mut expected)?;
    let mut actual = [0u8; 48];
    hardware.encrypt(&plaintext, &mut actual)?;
    assert_eq!(actual, expected);
    assert_eq!(actual[..16], actual[16..32]);

    for block in actual.chunks(16) {
        println!("{}", hex::encode(block));
    }
    println!("providers agree; repeated plaintext blocks repeat in the ciphertext");
    Ok(())
}
