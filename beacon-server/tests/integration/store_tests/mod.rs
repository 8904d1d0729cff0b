mod test_offer_answer_candidate_exchange;
