use rand::seq::SliceRandom;

/// Words of wisdom from the scholars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// The quote.
    pub text: &'static str,
    /// Who said it.
    pub author: &'static str,
}

const QUOTES: &[Quote] = &[
    Quote {
        text: "Barangsiapa yang menempuh jalan untuk mencari ilmu, maka Allah akan mudahkan \
               baginya jalan menuju surga.",
        author: "Imam An-Nawawi (syarah hadits)",
    },
    Quote {
        text: "Ilmu itu bukan yang dihafal, tetapi yang memberi manfaat.",
        author: "Imam Asy-Syafi'i",
    },
    Quote {
        text: "Jika engkau tidak sanggup menahan lelahnya belajar, maka engkau harus sanggup \
               menahan perihnya kebodohan.",
        author: "Imam Asy-Syafi'i",
    },
    Quote {
        text: "Dunia ini ibarat bayangan. Kejar dia dan engkau tak akan pernah bisa \
               menangkapnya. Balikkan badanmu darinya, dan dia tak punya pilihan lain selain \
               mengikutimu.",
        author: "Ibnu Qayyim Al-Jauziyyah",
    },
    Quote {
        text: "Hati yang paling bersih adalah hati yang paling sedikit dengkinya.",
        author: "Imam Al-Ghazali",
    },
    Quote {
        text: "Sabar itu ada dua macam: sabar atas sesuatu yang tidak engkau ingini dan sabar \
               menahan diri dari sesuatu yang engkau ingini.",
        author: "Ali bin Abi Thalib",
    },
    Quote {
        text: "Janganlah engkau mengucapkan perkataan yang engkau sendiri tak suka \
               mendengarnya jika orang lain mengucapkannya kepadamu.",
        author: "Ali bin Abi Thalib",
    },
    Quote {
        text: "Orang yang paling aku sukai adalah dia yang menunjukkan kesalahanku.",
        author: "Umar bin Khattab",
    },
    Quote {
        text: "Hisablah dirimu sebelum kamu dihisab.",
        author: "Umar bin Khattab",
    },
    Quote {
        text: "Setiap hari yang berlalu adalah bagian dari umurmu yang hilang.",
        author: "Hasan Al-Bashri",
    },
    Quote {
        text: "Aku tidak pernah mengobati sesuatu yang lebih sulit daripada niatku sendiri.",
        author: "Sufyan Ats-Tsauri",
    },
    Quote {
        text: "Tawakal adalah amalan hati.",
        author: "Imam Ahmad bin Hanbal",
    },
];

/// Picks a random quote.
pub fn random_quote() -> Quote {
    // The list is a non-empty constant.
    *QUOTES.choose(&mut rand::thread_rng()).unwrap_or(&QUOTES[0])
}
