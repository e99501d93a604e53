//! Prompt templates sent to the language model.

/// Rules the moderator checks every group message against.
const MODERATION_RULES: &str = "\
1. Dilarang keras mengirim spam atau promosi berulang.
2. Dilarang menggunakan bahasa kasar, SARA, atau ujaran kebencian.
3. Dilarang membagikan informasi pribadi (nomor telepon, alamat).
4. Dilarang mengirim link phising, malware, atau konten berbahaya.
5. Tetap pada topik yang relevan dengan grup.";

/// Asks the model to answer `safe` or give a short reprimand.
pub fn moderation(user_full_name: &str, message_text: &str) -> String {
    format!(
        "Anda adalah moderator AI untuk grup Telegram. Analisis pesan berikut dari pengguna \
         '{user_full_name}'.\n\n\
         Aturan Grup:\n{MODERATION_RULES}\n\n\
         Pesan Pengguna: \"{message_text}\"\n\n\
         Tugas Anda:\n\
         - Jika pesan tersebut mematuhi semua aturan, balas HANYA dengan kata: safe\n\
         - Jika pesan tersebut melanggar salah satu aturan, berikan teguran singkat, sopan, dan \
         jelas dalam Bahasa Indonesia yang menjelaskan aturan mana yang dilanggar. Jangan \
         menambahkan kata pembuka atau penutup, langsung ke poin teguran. Contoh: \"Pesan Anda \
         mengandung promosi yang tidak diizinkan.\" atau \"Harap gunakan bahasa yang sopan dan \
         tidak menyinggung.\""
    )
}

/// Islamic Q&A for `/tanya`.
pub fn question(question: &str) -> String {
    format!(
        "Anda adalah asisten yang menjawab pertanyaan seputar Islam dengan sopan, ringkas, dan \
         berdasarkan Al-Qur'an serta hadits shahih. Sertakan rujukan ayat atau hadits bila ada. \
         Jika pertanyaan menyangkut perkara fiqih yang diperselisihkan, sebutkan bahwa ada \
         perbedaan pendapat ulama dan sarankan untuk bertanya kepada ustadz setempat. Jawab \
         dalam Bahasa Indonesia tanpa format Markdown.\n\n\
         Pertanyaan: {question}"
    )
}

/// Story of a prophet or companion for `/kisah`. Without a name the model
/// picks one itself.
pub fn story(name: Option<&str>) -> String {
    let subject = match name {
        Some(name) => format!("tentang {name}"),
        None => "tentang salah satu Nabi atau Sahabat Nabi pilihan Anda".to_string(),
    };

    format!(
        "Ceritakan sebuah kisah singkat {subject} dalam Bahasa Indonesia. Gunakan sumber yang \
         dapat dipercaya, tulis dalam 3 sampai 5 paragraf pendek, dan akhiri dengan satu \
         pelajaran (hikmah) yang bisa diambil. Jangan gunakan format Markdown."
    )
}
