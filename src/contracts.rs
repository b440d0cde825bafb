//! Typed bindings for the two pre-deployed contracts
//!
//! Only the functions the relay and the client touch are declared.

use ethers::prelude::abigen;

abigen!(
    MyToken,
    r#"[
        function totalSupply() external view returns (uint256)
        function balanceOf(address account) external view returns (uint256)
        function allowance(address owner, address spender) external view returns (uint256)
        function getVotes(address account) external view returns (uint256)
        function mint(address to, uint256 amount) external
        function delegate(address delegatee) external
    ]"#
);

abigen!(
    TokenizedBallot,
    r#"[
        function proposals(uint256 index) external view returns (bytes32 name, uint256 voteCount)
        function winningProposal() external view returns (uint256)
        function vote(uint256 proposal, uint256 amount) external
    ]"#
);
