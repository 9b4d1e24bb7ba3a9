pub const POST_MORPHO_1: &str = r##"---
title: "Morpho Internals Part 1: The Singleton"
excerpt: "How Morpho Blue packs a lending protocol into one contract."
author: "ret2basic"
date: "2024-01-15"
readTime: "12 min read"
category: "DeFi Security"
tags: ["morpho", "lending", "evm"]
featured: true
image: "/images/morpho-1.png"
---
Morpho Blue is a single contract holding every market.

## The singleton pattern

Storage layout first.
"##;

pub const POST_MORPHO_2: &str = r##"---
title: "Morpho Internals Part 2: Interest Accrual"
excerpt: "Tracing borrow rate updates through the IRM."
author: "ret2basic"
date: "2024-01-22"
category: "DeFi Security"
tags: ["morpho", "lending"]
---
Interest accrues lazily on every market touch.
"##;

pub const POST_MORPHO_3: &str = r##"---
title: "Morpho Internals Part 3: Liquidations"
excerpt: "The health factor math behind seizures."
author: "ret2basic"
date: "2024-02-01"
category: "DeFi Security"
tags: ["morpho", "liquidations"]
---
A position is liquidatable when its LTV exceeds the LLTV.
"##;

pub const POST_SOLANA_1: &str = r##"---
title: "Owner checks and the missing signer"
excerpt: "The most common Solana bug class."
author: "taichi"
date: "2024-03-10"
category: "Solana Security"
tags: ["solana", "anchor"]
---
Every account passed to an instruction is attacker-controlled input.
"##;

pub const POST_MINIMAL: &str = r##"---
title: "A minimal post"
date: "2023-06-01"
---
Just a body.
"##;
