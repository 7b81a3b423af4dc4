//! Golden RFC 6962 vectors over the leaves `"0"`, `"1"`, ..., `"64"` (the decimal string of each index).

use crate::hash::{Digest, HASH_SIZE};
use crate::path::Path;

/// Number of leaves covered by [`ROOTS`].
pub const MAX_LEAVES: u64 = 65;

/// `ROOTS[n]` is the root of the tree over the first `n` leaves.
const ROOTS: [&str; MAX_LEAVES as usize + 1] = [
  "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
  "db3426e878068d28d269b6c87172322ce5372b65756d0789001d34835f601c03",
  "cb00989d94a569c0a678ae042b63dcd4625db96440517f37a6eb7976ea24ed4b",
  "725d5230db68f557470dc35f1d8865813acd7ebb07ad152774141decbae71327",
  "9f4a3fc20d4162dc37d4e23d907848731a76043ffff6d69288bf1abfbcff478e",
  "b6748f6ed7a99de7da84fd97e1a3bac6fab8999f4a43695cab9528a2de431147",
  "32805cc5e94134743d0aa580ef2ee332687b687fc2e4e2f72fee1cc712e0ba0c",
  "a3e23b32ccb6bf96d092d165d8aa546e09829de8f03b0e8957581d1e16b92bdf",
  "3b85a9626c1ccb64c6b95ec7fa64888defe2cf12e39e77e10812ce5fcb9cb58e",
  "e10cb99e8a9c48ae8a25e6c37ab3c88e6c93e8cf2a62cf7e4dcac1ea597e77d4",
  "2f03f203d1fa3a6e1388fa4cb5187c3b4f94762e578e0106815140e6a8c6bd21",
  "65b07199c8192c9a287a06327b03fd799c694b9953aae4fc19c968a1700cf0d5",
  "68ea642666ce43a6f1010476655b677f57e3759d0921fc69941d1c7466399b2b",
  "2520e1f2087a43eef012fea4774dc1568c8710a9cfa7f7e5094725f9e7ea19a2",
  "b2985dcc386c0054afec7eb026fbde89884f94c0e8cc64b3a78cfd051d2da71b",
  "ed9fbf444b8720911036bd67196cf53ac2a9d990ec95c9d51c79fc4b07f4c966",
  "acfca191dcca991f54c07c54700b28ac8625e74614b2dadb96e7ae94694bedc8",
  "1b2243bde9d95f307eb27d826ab93d1d95354d98f78633815a0189158c3a3c95",
  "2902418af0f7a7beea10f92c36357198d0c8fea83758d9294ff0dd9117fb22c8",
  "15231054416457438ab4d5553e9610e13a3a4b5cff7bebe4d9233e4cd3cfc3f7",
  "190b9e748b7b7a857e55f3e9d8ad68eab7019d2bd8cfd74660629c4f26ae4ae7",
  "f6e2d2440aaf8aca7503ea6c1db4c29f0cfe436b32ac05d64669aa09cf55dd6e",
  "0c24c74cb1b285f2465194ad2cc6304ddf195f4b59d2e94e82d97e858d531c7f",
  "ff5d4adba4ff4345a5af35f16949ebaffa66ba810c09abec8ba573db7adbd83c",
  "4573202ab5e4e5f902ddc7d6680bc3fe3b2044d6b9dd75f12cd91e8b1963ea7a",
  "3cc0274842a73172362e6b91c56b1d8ce2e7716ea5abab903706de1359661460",
  "405c51586266d58dd84d798e3d31c7f1dcd994717616685a5b99754768f4f7c3",
  "fcef2532e54a21067cc136061a80014ccbc45bdc30402f40459d58952cfcb1da",
  "3e9f416fa3ee66254aa632e412301427f8f52ae7ba16e57623a93d003509b744",
  "fd94af225aa9825fa6d1de775d99cce5a7f81c3aa61b1e891da59a7c3bae7f24",
  "4fa0b71081e0bdee6d8bd3c6a772b9bb88936dc51777f54cab2011bf3b104ae6",
  "e0e1f4b5608c8e78fb7e761e0d370bb313d04bf11d447119479aff07733996e2",
  "045771ee374b4f64c06fd3c905f8676c0594d72f062717dfb83b2f20c64772cc",
  "b232d45be7cf6487ff0b521d2d1681b929f1d98fff2dbea2412ada287b98a7a0",
  "34a14ca2982312ec0aa1d0e799d4183dfb2aeea9d87fb15c7b32b516ebf71c9f",
  "1b8a37b6de9a13a1ebb1208721823d9b7fe2b36c47d12ab00c18324383e04ba1",
  "445592d0217553c56265f63fe599bba53a014a73025d5ecf85a3983b3fdbcd1c",
  "23fe5eb3b8bbf2e5dadfdf2daa72df96bd7aa701b4581f37b6713e8fe32e0ee8",
  "131126448803c23ce689b568564179dad54e7d7fd8e6eaf20d217f231fd0506c",
  "d7aea71b87b5a37a88859eb88e72ab42a1ef0eb839f00a8b46f2b6ebc1c89074",
  "ddbb9b3cf949ee71624c128dd11befe36b0b9e5fea8860df3cd7f4c4741868a8",
  "f1d2baee1555aa7a8e0f5d7380d4102a1c319ad92b922f5ad5e9228398964941",
  "32cdc09f47acedba28cc6c833c764095abaa091629547893f0d5343fb2e9756d",
  "2ffbc162b34cc9a59c73ee3f1e5eab2a7de735824fb3a361267746057f4de576",
  "d2c5be464023e5823e292f501a35cd86c959b1d2401ca68506412799d32b4b30",
  "cf721d46ee4331b4d947c101491fdf8cf48695320d6f414dbb3d76237d5dbfdd",
  "91fba67c931e6312c812621511464ea75fe822e2acfde6569fb621ff0a5706ef",
  "a127ebe6a6359cce672916f9a57d9b63e81c6cc4c7a0304d88ba1dda94bbb4ac",
  "84e824a81159db36f74681ea79295eedcf32720c8517813d8da547f5a1ff82f7",
  "5e11fb63729803263a8f9ae78c922dd2f58f728ea30461999412643b8d52c5f4",
  "84a5fca33c1961e7eb803ce0d937f483ee95f04ca5f8665b5c7d97df054f8b6f",
  "572d1ee13b1a3a96d5f5e1643150aeac289db861a79da6841fb387f0dbfb31f1",
  "565344cd20ef72b3bf04b4741743e2684859fd66698261e39837a6e3bad74c6f",
  "821537bb523bc0d259cf22dc484edb38ee72da26f85aaf979a6a9166d557a0e6",
  "dd1ec6383ffed754b47e5df1d4c6f024d92033d9af0004945271504c399c3a4e",
  "14b579f91398afb9dbb508da8dd2f0155e0d6f4e88a1c7042bf2f1ca27fca932",
  "edee4bb1226bf569d466c839fea9fddfe30664efe8546ab0a4bd9c11cbdc1b08",
  "552b4019dad174c903037ce74ddba2bb5bfef5b94d4b1b48e81cc7a7e6e474f7",
  "26ec90af489dc98a6a144513ba090fe4fa68a26e66f9c461e0d025cebd30da93",
  "5d6520a143656dc174f793d9456769c52516e297a2abacb0a4ce3bfd40eff978",
  "d7ffbddf2529868155ebd4d062c3056d5bc013bc299635f3c46dc5f39b9ddba5",
  "2c2725cf12983f10b30b9d953e84f487d0445874b8e78e9f0f9405f6086e2566",
  "260b7a168a9cd28dcdab99de6fda4206a1c4d737a80c48f087d844db7576842c",
  "bc8f556b260efc44e31a93b35a7cb5487c286725c489ccec8ed94e731437cb04",
  "391a31ee43d791bbe11932a5a2242719c18874e81cf32f0d8d3d7bf31bfca6b8",
  "8b1a70c7c7fcebc868e5f3ae7c127fc9b1cc13f6d34699976e42592abc233d84",
];

/// `(leaf index, tree size, digests)`
const PATHS: &[(u64, u64, &[&str])] = &[
  (0, 1, &[]),
  (0, 2, &[
    "2215e8ac4e2b871c2a48189e79738c956c081e23ac2f2415bf77da199dfd920c",
  ]),
  (1, 2, &[
    "db3426e878068d28d269b6c87172322ce5372b65756d0789001d34835f601c03",
  ]),
  (2, 3, &[
    "cb00989d94a569c0a678ae042b63dcd4625db96440517f37a6eb7976ea24ed4b",
  ]),
  (0, 7, &[
    "2215e8ac4e2b871c2a48189e79738c956c081e23ac2f2415bf77da199dfd920c",
    "d51f2dfecb59566dabdbb6b40bf651cdf39e677b4425165e217590ff3e010edb",
    "973f083957c7359fb1943acf9e6689bca6ca5ea7197d808aad3c14498689efe0",
  ]),
  (5, 7, &[
    "11e1f558223f4c71b6be1cecfd1f0de87146d2594877c27b29ec519f9040213c",
    "3bf9c81c231cae70b678d3f3038f9f4f6d6b9d7adcf9b378f25919ae53d17686",
    "9f4a3fc20d4162dc37d4e23d907848731a76043ffff6d69288bf1abfbcff478e",
  ]),
  (6, 7, &[
    "d2737dce8a7df1d7d5cf4d5f52d274802c71bfe20a2e078682e71c182d398c90",
    "9f4a3fc20d4162dc37d4e23d907848731a76043ffff6d69288bf1abfbcff478e",
  ]),
  (7, 8, &[
    "3bf9c81c231cae70b678d3f3038f9f4f6d6b9d7adcf9b378f25919ae53d17686",
    "d2737dce8a7df1d7d5cf4d5f52d274802c71bfe20a2e078682e71c182d398c90",
    "9f4a3fc20d4162dc37d4e23d907848731a76043ffff6d69288bf1abfbcff478e",
  ]),
  (8, 9, &[
    "3b85a9626c1ccb64c6b95ec7fa64888defe2cf12e39e77e10812ce5fcb9cb58e",
  ]),
  (12, 13, &[
    "5b663a362601be3f3bac6431f9f61546fec111f629c96443d7b67cc0bdd5c945",
    "3b85a9626c1ccb64c6b95ec7fa64888defe2cf12e39e77e10812ce5fcb9cb58e",
  ]),
  (31, 64, &[
    "fb9f2414040dca487e65e10d44b16c45ac3dc7c6aa2a2193932071ad9be7513a",
    "041dc3c49284e749cef717a73da6a6dd079f46039878762fec0dddcbf4e5654e",
    "944ce7250f80fdfa0e357fff1d67ea9d954c3288db8254cc76ecd995bf35c799",
    "fb13c4a0fb821b2cbbf8717c5498b831f7165097d100af193f967d998aecf3b6",
    "acfca191dcca991f54c07c54700b28ac8625e74614b2dadb96e7ae94694bedc8",
    "3b9a58abb05cd3a37b1c82fbfeba409fd9f346c46cca526b647f7875ea01ec36",
  ]),
  (64, 65, &[
    "391a31ee43d791bbe11932a5a2242719c18874e81cf32f0d8d3d7bf31bfca6b8",
  ]),
];

/// `(old size, new size, digests)`
const PROOFS: &[(u64, u64, &[&str])] = &[
  (1, 1, &[]),
  (1, 2, &[
    "2215e8ac4e2b871c2a48189e79738c956c081e23ac2f2415bf77da199dfd920c",
  ]),
  (1, 3, &[
    "2215e8ac4e2b871c2a48189e79738c956c081e23ac2f2415bf77da199dfd920c",
    "fa61e3dec3439589f4784c893bf321d0084f04c572c7af2b68e3f3360a35b486",
  ]),
  (2, 3, &[
    "fa61e3dec3439589f4784c893bf321d0084f04c572c7af2b68e3f3360a35b486",
  ]),
  (2, 4, &[
    "d51f2dfecb59566dabdbb6b40bf651cdf39e677b4425165e217590ff3e010edb",
  ]),
  (2, 5, &[
    "d51f2dfecb59566dabdbb6b40bf651cdf39e677b4425165e217590ff3e010edb",
    "11e1f558223f4c71b6be1cecfd1f0de87146d2594877c27b29ec519f9040213c",
  ]),
  (3, 7, &[
    "fa61e3dec3439589f4784c893bf321d0084f04c572c7af2b68e3f3360a35b486",
    "906c5d2485cae722073a430f4d04fe1767507592cef226629aeadb85a2ec909d",
    "cb00989d94a569c0a678ae042b63dcd4625db96440517f37a6eb7976ea24ed4b",
    "973f083957c7359fb1943acf9e6689bca6ca5ea7197d808aad3c14498689efe0",
  ]),
  (4, 7, &[
    "973f083957c7359fb1943acf9e6689bca6ca5ea7197d808aad3c14498689efe0",
  ]),
  (4, 8, &[
    "31f2973ab63e19375dfe0d165a92ebd9a13d28b5e6fc78072c4068bd7bbfbc37",
  ]),
  (6, 8, &[
    "d2737dce8a7df1d7d5cf4d5f52d274802c71bfe20a2e078682e71c182d398c90",
    "f384a00ff1483ad123c05cb5035c9bfa46a2d925548a5fa36acf1776c9b0f448",
    "9f4a3fc20d4162dc37d4e23d907848731a76043ffff6d69288bf1abfbcff478e",
  ]),
  (7, 8, &[
    "3bf9c81c231cae70b678d3f3038f9f4f6d6b9d7adcf9b378f25919ae53d17686",
    "797427cf8368051fe7b8e3e9d5ade9c5bc9d0cf96f4f3fad2a1e1d7848368188",
    "d2737dce8a7df1d7d5cf4d5f52d274802c71bfe20a2e078682e71c182d398c90",
    "9f4a3fc20d4162dc37d4e23d907848731a76043ffff6d69288bf1abfbcff478e",
  ]),
  (8, 9, &[
    "195f58bc6d6b7b36335c95e08343825a7ae6f30437b4a7e6fa7b89d76907570a",
  ]),
  (13, 21, &[
    "14d7ff06c97daecfad7a749f4e5906a74ae8606d72d0c92697b7f9fe8c5a6bb4",
    "bfee87eb94a2778bda67282ca105e1637febe6bd21b074bda56e7fd14d19dc68",
    "5ce03f974de7478e420ef040ddc51525604947ea41425ae806df0869547694a0",
    "5b663a362601be3f3bac6431f9f61546fec111f629c96443d7b67cc0bdd5c945",
    "3b85a9626c1ccb64c6b95ec7fa64888defe2cf12e39e77e10812ce5fcb9cb58e",
    "15b0025a86d86b54d3506068e9e129b76bd7fa94d4ed4da8f46db113ccdfbed1",
  ]),
  (32, 64, &[
    "3b9a58abb05cd3a37b1c82fbfeba409fd9f346c46cca526b647f7875ea01ec36",
  ]),
  (33, 64, &[
    "4e41e2a2ac502f62ec6e590303667247640d7fe33a88153c486ce835e74c55ef",
    "fab3333230dd5d4cabd38b3a63e32cf6be1b2cd929f1b8308fd4f921662b1477",
    "708b1fb0f14bb044ec25c092eed29b6b317d013c700f1222a98e0ebe2474d52c",
    "348c6587713acd22cc47342df3ebc98a373db4715bebf43724c7784997faba70",
    "dfa57be7bac3f7e6b47b1f5d86915df3e9442fb29b4331ab8ffb0b9e4279041d",
    "ceddcd5a8d11d74a4e3dc4e7efdd10aaa8dec6a16cf5e1c78d2b1281eba5b43c",
    "045771ee374b4f64c06fd3c905f8676c0594d72f062717dfb83b2f20c64772cc",
  ]),
  (64, 65, &[
    "d84e02abe0c79dcfbd9908e4699cd73b92f503c8b1b7314a36f9d64ed9f95278",
  ]),
];

pub fn leaf(i: u64) -> Vec<u8> {
  i.to_string().into_bytes()
}

pub fn digest(s: &str) -> Digest {
  let bytes = hex::decode(s).unwrap();
  assert_eq!(HASH_SIZE, bytes.len());
  bytes.try_into().unwrap()
}

pub fn root(n: u64) -> Digest {
  digest(ROOTS[n as usize])
}

fn expand(table: &[(u64, u64, &[&str])]) -> Vec<(u64, u64, Path)> {
  table.iter().map(|(x, n, hs)| (*x, *n, Path::from(hs.iter().map(|h| digest(h)).collect::<Vec<_>>()))).collect()
}

/// `(i, n, MPath(i, leaves[..n]))`
pub fn paths() -> Vec<(u64, u64, Path)> {
  expand(PATHS)
}

/// `(m, n, MProof(m, leaves[..n]))`
pub fn proofs() -> Vec<(u64, u64, Path)> {
  expand(PROOFS)
}
