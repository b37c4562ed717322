//! Known-answer-test (KAT) record generation.
//!
//! Writes the plain-text record format of the reference suites: a `Count`
//! line, upper-case hex fields, one blank-line-separated record per input.
//! Inputs are the deterministic `0x00 0x01 ..` byte pattern the reference
//! files use, so the output can be diffed against
//! `LWC_HASH_KAT_256.txt`-style files directly. Callers pick the
//! destination; nothing here touches global state.

use std::io::{self, Write};

use crate::{Aead, Aead128, Hash, Mac, Xof};

/// The deterministic input pattern of the reference KAT files.
fn pattern(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i % 256) as u8).collect()
}

/// Writes one `Msg`/`MD` record per message length in `0..=max_len`.
pub fn write_hash_kat<W: Write>(w: &mut W, max_len: usize) -> io::Result<()> {
    for i in 0..=max_len {
        let msg = pattern(i);
        let mut h = Hash::new();
        h.update(&msg);
        writeln!(w, "Count = {}", i + 1)?;
        writeln!(w, "Msg = {}", hex::encode_upper(&msg))?;
        writeln!(w, "MD = {}", hex::encode_upper(h.sum()))?;
        writeln!(w)?;
    }
    log::debug!("wrote {} hash KAT records", max_len + 1);
    Ok(())
}

/// Writes one `Msg`/`MD` record per message length in `0..=max_len`, with
/// a 32-byte XOF read as the digest.
pub fn write_xof_kat<W: Write>(w: &mut W, max_len: usize) -> io::Result<()> {
    for i in 0..=max_len {
        let msg = pattern(i);
        let mut x = Xof::new();
        x.update(&msg);
        let mut md = [0u8; 32];
        x.read(&mut md);
        writeln!(w, "Count = {}", i + 1)?;
        writeln!(w, "Msg = {}", hex::encode_upper(&msg))?;
        writeln!(w, "MD = {}", hex::encode_upper(md))?;
        writeln!(w)?;
    }
    Ok(())
}

/// Writes the 33×33 grid of Ascon-128 records: every plaintext length and
/// associated-data length in `0..=32`.
pub fn write_aead_kat<W: Write>(w: &mut W) -> io::Result<()> {
    let aead = Aead::new(&pattern(16));
    write_aead_grid(w, |nonce, msg, ad| aead.seal(nonce, msg, ad))
}

/// Writes the 33×33 grid of Ascon-AEAD128 records.
pub fn write_aead128_kat<W: Write>(w: &mut W) -> io::Result<()> {
    let aead = Aead128::new(&pattern(16));
    write_aead_grid(w, |nonce, msg, ad| aead.seal(nonce, msg, ad))
}

fn write_aead_grid<W, F>(w: &mut W, seal: F) -> io::Result<()>
where
    W: Write,
    F: Fn(&[u8], &[u8], &[u8]) -> Vec<u8>,
{
    let key = pattern(16);
    let nonce = pattern(16);
    let mut count = 1;
    for i in 0..=32 {
        for j in 0..=32 {
            let msg = pattern(i);
            let ad = pattern(j);
            let ct = seal(&nonce, &msg, &ad);
            writeln!(w, "Count = {count}")?;
            writeln!(w, "Key = {}", hex::encode_upper(&key))?;
            writeln!(w, "Nonce = {}", hex::encode_upper(&nonce))?;
            writeln!(w, "PT = {}", hex::encode_upper(&msg))?;
            writeln!(w, "AD = {}", hex::encode_upper(&ad))?;
            writeln!(w, "CT = {}", hex::encode_upper(&ct))?;
            writeln!(w)?;
            count += 1;
        }
    }
    Ok(())
}

/// Writes one `Key`/`Msg`/`Tag` record per message length in `0..=max_len`.
pub fn write_mac_kat<W: Write>(w: &mut W, max_len: usize) -> io::Result<()> {
    let key = pattern(16);
    for i in 0..=max_len {
        let msg = pattern(i);
        let mut mac = Mac::new(&key);
        mac.update(&msg);
        writeln!(w, "Count = {}", i + 1)?;
        writeln!(w, "Key = {}", hex::encode_upper(&key))?;
        writeln!(w, "Msg = {}", hex::encode_upper(&msg))?;
        writeln!(w, "Tag = {}", hex::encode_upper(mac.sum()))?;
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(text: &str) -> Vec<&str> {
        text.split("\n\n").filter(|r| !r.is_empty()).collect()
    }

    #[test]
    fn hash_kat_first_record_is_the_empty_vector() {
        let mut out = Vec::new();
        write_hash_kat(&mut out, 4).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(
            "Count = 1\n\
             Msg = \n\
             MD = 7346BC14F036E87AE03D0997913088F5F68411434B3CF8B54FA796A80D251F91\n\n"
        ));
        assert_eq!(records(&text).len(), 5);
    }

    #[test]
    fn mac_kat_first_record_is_the_empty_vector() {
        let mut out = Vec::new();
        write_mac_kat(&mut out, 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Count = 1\n\
             Key = 000102030405060708090A0B0C0D0E0F\n\
             Msg = \n\
             Tag = EB1AF688825D66BF2D53E135F9323315\n\n"
        );
    }

    #[test]
    fn aead_kat_contains_the_reference_records() {
        let mut out = Vec::new();
        write_aead_kat(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let all = records(&text);
        assert_eq!(all.len(), 33 * 33);

        // Count = 514: PT of 15 bytes, AD of 18 bytes
        let record = all[513];
        assert!(record.starts_with("Count = 514\n"));
        assert!(
            record.ends_with(
                "CT = 77AA511159627C4B855E67F95B3ABFA1FA8B51439743E4C8B41E4E76B40460"
            ),
            "unexpected record: {record}"
        );

        // Count = 496: same PT, empty AD
        let record = all[495];
        assert!(record.contains("AD = \n"));
        assert!(record
            .ends_with("CT = BC820DBDF7A4631C5B29884AD6917516D420A5BC2E5357D010818F0B5F7859"));
    }

    #[test]
    fn xof_and_aead128_kats_have_the_expected_shape() {
        let mut out = Vec::new();
        write_xof_kat(&mut out, 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(records(&text).len(), 3);
        assert!(text.starts_with("Count = 1\nMsg = \nMD = "));

        let mut out = Vec::new();
        write_aead128_kat(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let all = records(&text);
        assert_eq!(all.len(), 33 * 33);
        // empty-plaintext records still carry a 16-byte tag
        assert!(all[0].contains("PT = \n"));
        let ct_line = all[0].lines().last().unwrap();
        assert_eq!(ct_line.len(), "CT = ".len() + 32);
    }
}
